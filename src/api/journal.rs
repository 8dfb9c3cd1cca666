//! Journal endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{insert_journal, list_journals, JournalEntry};
use crate::AppState;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::validation::validate_required_text;
use super::SuccessResponse;

#[derive(Debug, Deserialize)]
pub struct CreateJournalRequest {
    #[serde(default)]
    pub entry: String,
}

pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(request): Json<CreateJournalRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let entry = validate_required_text("Journal entry", &request.entry, 10_000)
        .map_err(ApiError::validation)?;

    insert_journal(&state.db, user.email(), &entry).await?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    let entries = list_journals(&state.db, user.email()).await?;
    Ok(Json(entries))
}
