//! Contact intake: persists a submission, then enriches it with a lead score.
//!
//! Flow: store.create (must succeed) → analyzer.analyze → store.update_scoring.
//!
//! The second half runs on its own task. Its failures are returned as an
//! `EnrichmentError` value that `submit` logs and swallows, so a submission is
//! never lost or failed because scoring went wrong. If the caller goes away
//! after the insert, the task still finishes and the record is enriched later.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::contacts::models::{Contact, ContactSubmission};
use crate::contacts::store::{ContactStore, StoreError};
use crate::scoring::analyzer::LeadAnalyzer;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("failed to store scoring: {0}")]
    Store(#[from] StoreError),

    #[error("contact {0} was deleted before scoring was stored")]
    Vanished(i64),

    #[error("enrichment task did not complete: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct ContactIntake {
    store: Arc<dyn ContactStore>,
    analyzer: Arc<LeadAnalyzer>,
}

impl ContactIntake {
    pub fn new(store: Arc<dyn ContactStore>, analyzer: Arc<LeadAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    /// Records a validated submission and returns it, scored when possible.
    ///
    /// Only a failure of the initial insert is returned as an error.
    pub async fn submit(&self, submission: ContactSubmission) -> Result<Contact, StoreError> {
        let contact = self.store.create(&submission).await?;
        info!("Contact {} created", contact.id);

        let task = tokio::spawn(enrich(
            Arc::clone(&self.store),
            Arc::clone(&self.analyzer),
            contact.clone(),
        ));

        match task.await.map_err(EnrichmentError::from).and_then(|r| r) {
            Ok(enriched) => Ok(enriched),
            Err(e) => {
                error!(
                    "Enrichment of contact {} failed, returning it unscored: {e}",
                    contact.id
                );
                Ok(contact)
            }
        }
    }
}

async fn enrich(
    store: Arc<dyn ContactStore>,
    analyzer: Arc<LeadAnalyzer>,
    contact: Contact,
) -> Result<Contact, EnrichmentError> {
    let scoring = analyzer
        .analyze(
            &contact.name,
            &contact.email,
            contact.company.as_deref(),
            &contact.message,
        )
        .await;

    let enriched = store
        .update_scoring(contact.id, &scoring)
        .await?
        .ok_or(EnrichmentError::Vanished(contact.id))?;

    info!(
        "Contact {} scored: {} ({}, ai_enabled={}, source={}{})",
        enriched.id,
        scoring.assessment.score,
        scoring.assessment.priority,
        scoring.ai_enabled(),
        scoring.source_label(),
        scoring
            .error()
            .map(|e| format!(", error={e}"))
            .unwrap_or_default()
    );

    Ok(enriched)
}
