//! Axum route handlers for the Contacts API.
//!
//! Creating a contact is public. Everything else requires an admin token.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::RequireAdmin;
use crate::contacts::models::{Contact, ContactStatus, ContactSubmission, StatusUpdate};
use crate::contacts::store::Page;
use crate::contacts::validation::validate_submission;
use crate::errors::{AppError, AppJson};
use crate::state::AppState;

const MAX_PAGE_SIZE: i64 = 500;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub email: Option<String>,
}

impl ListParams {
    fn page(&self) -> Result<Page, AppError> {
        let defaults = Page::default();
        let skip = self.skip.unwrap_or(defaults.skip);
        let limit = self.limit.unwrap_or(defaults.limit);
        if skip < 0 {
            return Err(AppError::Validation("skip must not be negative".to_string()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Page { skip, limit })
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// POST /api/v1/contacts
pub async fn handle_create_contact(
    State(state): State<AppState>,
    AppJson(submission): AppJson<ContactSubmission>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let submission = validate_submission(submission).map_err(AppError::Validation)?;
    let contact = state.intake.submit(submission).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/v1/contacts
///
/// `?email=` returns every submission from that address; otherwise a page
/// ordered newest first.
pub async fn handle_list_contacts(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = match params.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => state.store.get_by_email(email).await?,
        _ => state.store.list(params.page()?).await?,
    };
    Ok(Json(contacts))
}

/// GET /api/v1/contacts/:id
pub async fn handle_get_contact(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, AppError> {
    let contact = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::contact_not_found(id))?;
    Ok(Json(contact))
}

/// PUT /api/v1/contacts/:id
///
/// Only the workflow status can change; unknown values never reach the store.
pub async fn handle_update_contact(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(update): AppJson<StatusUpdate>,
) -> Result<Json<Contact>, AppError> {
    let status = update
        .status
        .trim()
        .parse::<ContactStatus>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let contact = state
        .store
        .update_status(id, status)
        .await?
        .ok_or_else(|| AppError::contact_not_found(id))?;

    info!("Contact {id} status set to {status}");
    Ok(Json(contact))
}

/// DELETE /api/v1/contacts/:id
pub async fn handle_delete_contact(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::contact_not_found(id));
    }
    info!("Contact {id} deleted");
    Ok(Json(DeleteResponse {
        message: "Contact deleted successfully".to_string(),
    }))
}
