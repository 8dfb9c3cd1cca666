//! View-data endpoints backing the frontend pages.
//!
//! Each page GET returns the owner-scoped data that page renders; the
//! rendering itself happens client-side from the statically served
//! frontend.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::db::{
    list_community_posts, list_community_posts_by_owner, list_journals, list_meditations,
    list_moods, CommunityPost, JournalEntry, MeditationSession, MoodEntry,
};
use crate::AppState;

use super::auth::CurrentUser;
use super::error::ApiError;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub mood_entries: Vec<MoodEntry>,
    pub journal_entries: Vec<JournalEntry>,
    pub meditation_entries: Vec<MeditationSession>,
    pub community_posts: Vec<CommunityPost>,
}

#[derive(Debug, Serialize)]
pub struct JournalView {
    pub entries: Vec<JournalEntry>,
}

#[derive(Debug, Serialize)]
pub struct CommunityView {
    pub posts: Vec<CommunityPost>,
}

#[derive(Debug, Serialize)]
pub struct MeditationView {
    pub sessions: Vec<MeditationSession>,
}

#[derive(Debug, Serialize)]
pub struct ExportView {
    pub mood_entries: Vec<MoodEntry>,
    pub journal_entries: Vec<JournalEntry>,
    pub meditation_entries: Vec<MeditationSession>,
}

/// Everything the dashboard shows. The community section here is the
/// user's own posts; the community page itself is global.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<DashboardView>, ApiError> {
    let email = user.email();
    Ok(Json(DashboardView {
        mood_entries: list_moods(&state.db, email).await?,
        journal_entries: list_journals(&state.db, email).await?,
        meditation_entries: list_meditations(&state.db, email).await?,
        community_posts: list_community_posts_by_owner(&state.db, email).await?,
    }))
}

pub async fn journal(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<JournalView>, ApiError> {
    Ok(Json(JournalView {
        entries: list_journals(&state.db, user.email()).await?,
    }))
}

pub async fn community(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<Json<CommunityView>, ApiError> {
    Ok(Json(CommunityView {
        posts: list_community_posts(&state.db).await?,
    }))
}

pub async fn meditation(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<MeditationView>, ApiError> {
    Ok(Json(MeditationView {
        sessions: list_meditations(&state.db, user.email()).await?,
    }))
}

/// One document with everything the owner can take with them.
pub async fn export(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ExportView>, ApiError> {
    let email = user.email();
    Ok(Json(ExportView {
        mood_entries: list_moods(&state.db, email).await?,
        journal_entries: list_journals(&state.db, email).await?,
        meditation_entries: list_meditations(&state.db, email).await?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{insert_community_post, insert_journal, insert_mood, test_pool};

    #[tokio::test]
    async fn dashboard_is_owner_scoped() {
        let state = Arc::new(AppState::new(Config::default(), test_pool().await));
        let alice = CurrentUser(
            crate::db::insert_user(&state.db, "Alice", "alice@x.com", "h")
                .await
                .unwrap(),
        );

        insert_mood(&state.db, "alice@x.com", "happy", "").await.unwrap();
        insert_journal(&state.db, "bob@x.com", "bob's diary").await.unwrap();
        insert_community_post(&state.db, "bob@x.com", "Bob", "hi all").await.unwrap();

        let Json(view) = dashboard(State(state.clone()), alice.clone()).await.unwrap();
        assert_eq!(view.mood_entries.len(), 1);
        assert!(view.journal_entries.is_empty());
        // Dashboard community section shows only the owner's posts
        assert!(view.community_posts.is_empty());

        // The community page is global
        let Json(view) = community(State(state), alice).await.unwrap();
        assert_eq!(view.posts.len(), 1);
    }

    #[tokio::test]
    async fn export_returns_all_owner_records() {
        let state = Arc::new(AppState::new(Config::default(), test_pool().await));
        let alice = CurrentUser(
            crate::db::insert_user(&state.db, "Alice", "alice@x.com", "h")
                .await
                .unwrap(),
        );

        insert_mood(&state.db, "alice@x.com", "calm", "after yoga").await.unwrap();
        insert_journal(&state.db, "alice@x.com", "entry one").await.unwrap();

        let Json(view) = export(State(state), alice).await.unwrap();
        assert_eq!(view.mood_entries.len(), 1);
        assert_eq!(view.journal_entries.len(), 1);
        assert!(view.meditation_entries.is_empty());
    }
}
