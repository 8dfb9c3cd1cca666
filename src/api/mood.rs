//! Mood entry endpoint.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::insert_mood;
use crate::AppState;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::validation::{validate_optional_text, validate_required_text};
use super::SuccessResponse;

#[derive(Debug, Deserialize)]
pub struct CreateMoodRequest {
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub description: String,
}

pub async fn create_mood(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(request): Json<CreateMoodRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let mood = validate_required_text("Mood", &request.mood, 64).map_err(ApiError::validation)?;
    let description = validate_optional_text("Description", &request.description, 2000)
        .map_err(ApiError::validation)?;

    insert_mood(&state.db, user.email(), &mood, &description).await?;

    Ok(Json(SuccessResponse::with_message("Mood saved successfully!")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{list_moods, test_pool};
    use axum::http::StatusCode;

    async fn state_with_user() -> (Arc<AppState>, CurrentUser) {
        let state = Arc::new(AppState::new(Config::default(), test_pool().await));
        let user = crate::db::insert_user(&state.db, "Alice", "alice@x.com", "h")
            .await
            .unwrap();
        (state, CurrentUser(user))
    }

    #[tokio::test]
    async fn saves_mood_for_owner() {
        let (state, user) = state_with_user().await;

        create_mood(
            State(state.clone()),
            user,
            Json(CreateMoodRequest {
                mood: "happy".to_string(),
                description: "good day".to_string(),
            }),
        )
        .await
        .unwrap();

        let moods = list_moods(&state.db, "alice@x.com").await.unwrap();
        assert_eq!(moods.len(), 1);
        assert_eq!(moods[0].mood, "happy");
        assert_eq!(moods[0].description, "good day");
    }

    #[tokio::test]
    async fn empty_mood_is_rejected_and_nothing_persists() {
        let (state, user) = state_with_user().await;

        let err = create_mood(
            State(state.clone()),
            user,
            Json(CreateMoodRequest {
                mood: "  ".to_string(),
                description: String::new(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(list_moods(&state.db, "alice@x.com").await.unwrap().is_empty());
    }
}
