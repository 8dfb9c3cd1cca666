//! Community post endpoints.
//!
//! Reads here are store-wide: every authenticated user sees all posts.
//! Writes are attributed to the session user, whatever the payload says.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{insert_community_post, list_community_posts, CommunityPost};
use crate::AppState;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::validation::validate_required_text;
use super::SuccessResponse;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub message: String,
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::validation("Message cannot be empty."));
    }
    let message = validate_required_text("Message", &request.message, 2000)
        .map_err(ApiError::validation)?;

    insert_community_post(&state.db, user.email(), user.name(), &message).await?;

    Ok(Json(SuccessResponse::with_message("Post shared successfully!")))
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<Json<Vec<CommunityPost>>, ApiError> {
    let posts = list_community_posts(&state.db).await?;
    Ok(Json(posts))
}
