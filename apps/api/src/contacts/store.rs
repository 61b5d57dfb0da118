//! Contact persistence.
//!
//! Every mutation is one field-scoped statement on one row, so a status change
//! and a scoring write-back racing on the same contact cannot clobber each other.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;

use crate::contacts::models::{Contact, ContactStatus, ContactSubmission};
use crate::scoring::models::ScoringResult;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Offset pagination, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Inserts a new contact with status `new` and no enrichment.
    async fn create(&self, submission: &ContactSubmission) -> Result<Contact, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Contact>, StoreError>;

    /// All submissions from an address, newest first. Emails are not unique.
    async fn get_by_email(&self, email: &str) -> Result<Vec<Contact>, StoreError>;

    async fn list(&self, page: Page) -> Result<Vec<Contact>, StoreError>;

    /// Replaces only `status` and `updated_at`. `None` when the id is absent.
    async fn update_status(
        &self,
        id: i64,
        status: ContactStatus,
    ) -> Result<Option<Contact>, StoreError>;

    /// Replaces only the four AI fields and `updated_at`. `None` when the id is absent.
    async fn update_scoring(
        &self,
        id: i64,
        scoring: &ScoringResult,
    ) -> Result<Option<Contact>, StoreError>;

    /// `false` when there was nothing to delete.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn create(&self, submission: &ContactSubmission) -> Result<Contact, StoreError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, phone, company, message, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.company)
        .bind(&submission.message)
        .bind(ContactStatus::New.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(contact)
    }

    async fn get(&self, id: i64) -> Result<Option<Contact>, StoreError> {
        Ok(
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_by_email(&self, email: &str) -> Result<Vec<Contact>, StoreError> {
        Ok(sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE email = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list(&self, page: Page) -> Result<Vec<Contact>, StoreError> {
        Ok(sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts ORDER BY created_at DESC, id DESC OFFSET $1 LIMIT $2",
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_status(
        &self,
        id: i64,
        status: ContactStatus,
    ) -> Result<Option<Contact>, StoreError> {
        Ok(sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_scoring(
        &self,
        id: i64,
        scoring: &ScoringResult,
    ) -> Result<Option<Contact>, StoreError> {
        let assessment = &scoring.assessment;
        Ok(sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET ai_score = $2,
                ai_priority = $3,
                ai_insights = $4,
                ai_suggested_response = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(assessment.score)
        .bind(assessment.priority.as_str())
        .bind(Json(&assessment.insights))
        .bind(&assessment.suggested_response)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
