//! Meditation session endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{insert_meditation, list_meditations, MeditationSession};
use crate::AppState;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::validation::{validate_duration_minutes, validate_required_text};
use super::SuccessResponse;

/// Accepts both snake_case and the camelCase the frontend sends.
#[derive(Debug, Deserialize)]
pub struct LogMeditationRequest {
    #[serde(default, alias = "sessionType")]
    pub session_type: String,
    #[serde(default, alias = "durationMinutes")]
    pub duration_minutes: Option<i64>,
}

pub async fn log_session(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(request): Json<LogMeditationRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let session_type = validate_required_text("Session type", &request.session_type, 64)
        .map_err(ApiError::validation)?;
    let duration = request
        .duration_minutes
        .ok_or_else(|| ApiError::validation("Duration is required."))?;
    let duration = validate_duration_minutes(duration).map_err(ApiError::validation)?;

    insert_meditation(&state.db, user.email(), &session_type, duration).await?;

    Ok(Json(SuccessResponse::with_message(
        "Meditation session logged.",
    )))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<MeditationSession>>, ApiError> {
    let sessions = list_meditations(&state.db, user.email()).await?;
    Ok(Json(sessions))
}
