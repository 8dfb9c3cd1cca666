pub mod auth;
mod community;
pub mod error;
mod journal;
mod meditation;
mod mood;
mod pages;
mod password_reset;
mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Success envelope shared by all write endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // Account routes (public, except logout which clears whatever is there)
    let account_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/forgot-password", post(password_reset::forgot_password))
        .route("/reset-password", post(password_reset::reset_password));

    // Record API. Protection comes from the CurrentUser extractor on
    // every handler, not from the nest.
    let api_routes = Router::new()
        .route("/mood", post(mood::create_mood))
        .route(
            "/journal",
            get(journal::list_entries).post(journal::create_entry),
        )
        .route(
            "/meditation",
            get(meditation::list_sessions).post(meditation::log_session),
        )
        .route(
            "/community",
            get(community::list_posts).post(community::create_post),
        );

    // Page view data (session required)
    let page_routes = Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/journal", get(pages::journal))
        .route("/community", get(pages::community))
        .route("/meditation", get(pages::meditation))
        .route("/export", get(pages::export));

    Router::new()
        .route("/health", get(health_check))
        .merge(account_routes)
        .merge(page_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
