//! Stubbed password-reset flow.
//!
//! No email is ever sent. The forgot-password acknowledgement is the
//! same whether or not the account exists; only the server log knows.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::find_user_by_email;
use crate::AppState;

use super::error::ApiError;
use super::validation::{validate_email, validate_required_text};
use super::SuccessResponse;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: String,
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let email = validate_email(&request.email).map_err(ApiError::validation)?;

    let known = find_user_by_email(&state.db, &email).await?.is_some();
    tracing::info!(known, "Password reset requested");

    Ok(Json(SuccessResponse::with_message(
        "If this email exists, a password reset link has been sent to your inbox.",
    )))
}

pub async fn reset_password(
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    validate_required_text("Password", &request.password, 512).map_err(ApiError::validation)?;

    // TODO: wire up to a real token-based reset once email delivery exists
    Ok(Json(SuccessResponse::with_message("Password reset successful!")))
}
