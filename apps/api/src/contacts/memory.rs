//! In-memory `ContactStore` used by the orchestrator and router tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::contacts::models::{Contact, ContactStatus, ContactSubmission};
use crate::contacts::store::{ContactStore, Page, StoreError};
use crate::scoring::models::ScoringResult;

#[derive(Default)]
struct Rows {
    last_id: i64,
    by_id: BTreeMap<i64, Contact>,
}

#[derive(Default)]
pub struct MemoryContactStore {
    rows: RwLock<Rows>,
    pub fail_creates: AtomicBool,
    pub fail_scoring_updates: AtomicBool,
}

fn injected() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

fn newest_first(mut contacts: Vec<Contact>) -> Vec<Contact> {
    contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    contacts
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.by_id.len()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn create(&self, submission: &ContactSubmission) -> Result<Contact, StoreError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(injected());
        }
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let now = Utc::now();
        let contact = Contact {
            id: rows.last_id,
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            company: submission.company.clone(),
            message: submission.message.clone(),
            status: ContactStatus::New.as_str().to_string(),
            ai_score: None,
            ai_priority: None,
            ai_insights: None,
            ai_suggested_response: None,
            created_at: now,
            updated_at: now,
        };
        rows.by_id.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn get(&self, id: i64) -> Result<Option<Contact>, StoreError> {
        Ok(self.rows.read().await.by_id.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Vec<Contact>, StoreError> {
        let rows = self.rows.read().await;
        Ok(newest_first(
            rows.by_id
                .values()
                .filter(|c| c.email == email)
                .cloned()
                .collect(),
        ))
    }

    async fn list(&self, page: Page) -> Result<Vec<Contact>, StoreError> {
        let rows = self.rows.read().await;
        Ok(newest_first(rows.by_id.values().cloned().collect())
            .into_iter()
            .skip(page.skip.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .collect())
    }

    async fn update_status(
        &self,
        id: i64,
        status: ContactStatus,
    ) -> Result<Option<Contact>, StoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows.by_id.get_mut(&id).map(|contact| {
            contact.status = status.as_str().to_string();
            contact.updated_at = Utc::now();
            contact.clone()
        }))
    }

    async fn update_scoring(
        &self,
        id: i64,
        scoring: &ScoringResult,
    ) -> Result<Option<Contact>, StoreError> {
        if self.fail_scoring_updates.load(Ordering::SeqCst) {
            return Err(injected());
        }
        let assessment = &scoring.assessment;
        let insights = serde_json::to_value(&assessment.insights).unwrap();
        let mut rows = self.rows.write().await;
        Ok(rows.by_id.get_mut(&id).map(|contact| {
            contact.ai_score = Some(assessment.score);
            contact.ai_priority = Some(assessment.priority.as_str().to_string());
            contact.ai_insights = Some(insights);
            contact.ai_suggested_response = Some(assessment.suggested_response.clone());
            contact.updated_at = Utc::now();
            contact.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.rows.write().await.by_id.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(email: &str) -> ContactSubmission {
        ContactSubmission {
            name: "Bo".to_string(),
            email: email.to_string(),
            phone: Some("+1 555 0100".to_string()),
            company: None,
            message: "Interested in a demo next week.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_new_status() {
        let store = MemoryContactStore::new();
        let a = store.create(&submission("a@x.io")).await.unwrap();
        let b = store.create(&submission("b@x.io")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.status, "new");
        assert!(!a.is_scored());
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn test_update_status_leaves_ai_fields_untouched() {
        let store = MemoryContactStore::new();
        let created = store.create(&submission("a@x.io")).await.unwrap();
        store
            .update_scoring(created.id, &ScoringResult::disabled())
            .await
            .unwrap();
        let scored = store.get(created.id).await.unwrap().unwrap();

        let updated = store
            .update_status(created.id, ContactStatus::Qualified)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "qualified");
        assert_eq!(updated.ai_score, scored.ai_score);
        assert_eq!(updated.ai_priority, scored.ai_priority);
        assert_eq!(updated.ai_insights, scored.ai_insights);
        assert_eq!(updated.ai_suggested_response, scored.ai_suggested_response);
        assert_eq!(updated.message, scored.message);
        assert_eq!(updated.created_at, scored.created_at);
        assert!(updated.updated_at >= scored.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_none() {
        let store = MemoryContactStore::new();
        assert!(store
            .update_status(42, ContactStatus::Closed)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .update_scoring(42, &ScoringResult::disabled())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryContactStore::new();
        let created = store.create(&submission("a@x.io")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(store.get(created.id).await.unwrap().is_none());
        assert!(!store.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paginated() {
        let store = MemoryContactStore::new();
        for i in 0..5 {
            store
                .create(&submission(&format!("{i}@x.io")))
                .await
                .unwrap();
        }
        let page = store.list(Page { skip: 1, limit: 2 }).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[tokio::test]
    async fn test_get_by_email_returns_every_submission() {
        let store = MemoryContactStore::new();
        store.create(&submission("dup@x.io")).await.unwrap();
        store.create(&submission("other@x.io")).await.unwrap();
        store.create(&submission("dup@x.io")).await.unwrap();
        let found = store.get_by_email("dup@x.io").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].id > found[1].id);
        assert!(store.get_by_email("none@x.io").await.unwrap().is_empty());
    }
}
