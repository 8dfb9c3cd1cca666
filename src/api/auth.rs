//! Session authentication: signup, login, logout and the request guard
//! every protected route goes through.
//!
//! Sessions are server-side rows keyed by the SHA-256 of a random token;
//! the raw token only ever lives in an HttpOnly cookie (or a Bearer
//! header for programmatic clients). Passwords are stored as Argon2
//! hashes and never logged.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use lazy_static::lazy_static;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::db::{
    create_session, delete_session, find_session_user, find_user_by_email, insert_user,
    LoginRequest, LoginResponse, SignupRequest, User, UserResponse,
};
use crate::AppState;

use super::error::ApiError;
use super::validation::{validate_email, validate_required_text};
use super::SuccessResponse;

lazy_static! {
    /// Hash verified on the unknown-email login path so that path costs
    /// the same as a real password check.
    static ref DUMMY_HASH: String =
        hash_password("mindwell-dummy-credential").expect("dummy hash");
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generate a random session token
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Hash a token for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Signup endpoint. Creates the user; the caller still has to log in.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let name = validate_required_text("Name", &request.name, 120).map_err(ApiError::validation)?;
    let email = validate_email(&request.email).map_err(ApiError::validation)?;
    let password =
        validate_required_text("Password", &request.password, 512).map_err(ApiError::validation)?;

    if find_user_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::duplicate_identity());
    }

    let password_hash = hash_password(&password)
        .map_err(|_| ApiError::internal("Failed to hash password"))?;

    // The UNIQUE constraint catches a concurrent signup for the same
    // email; From<sqlx::Error> maps it to duplicate_identity.
    let user = insert_user(&state.db, &name, &email, &password_hash).await?;

    tracing::info!(email = %user.email, "User registered");

    Ok(Json(SuccessResponse::with_message(
        "Account created successfully.",
    )))
}

/// Login endpoint. Verifies credentials and establishes a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let user = find_user_by_email(&state.db, request.email.trim()).await?;

    let user = match user {
        Some(user) if verify_password(&request.password, &user.password_hash) => user,
        Some(_) => return Err(ApiError::invalid_credentials()),
        None => {
            // Burn a verification so unknown emails are not faster
            let _ = verify_password(&request.password, &DUMMY_HASH);
            return Err(ApiError::invalid_credentials());
        }
    };

    // Invalidate any session this connection was already carrying
    let prior = jar
        .get(&state.config.auth.cookie_name)
        .map(|c| hash_token(c.value()));
    if let Some(old_hash) = prior {
        delete_session(&state.db, &old_hash).await?;
    }

    let token = generate_token();
    create_session(
        &state.db,
        &user.id,
        &hash_token(&token),
        state.config.auth.session_ttl_hours,
    )
    .await?;

    tracing::info!(email = %user.email, "User logged in");

    let cookie = Cookie::build((state.config.auth.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.auth.cookie_secure)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            message: "Logged in successfully.".to_string(),
            user: UserResponse::from(user),
        }),
    ))
}

/// Logout endpoint. Clears all session state for the connection; never
/// fails, even without a session.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = if let Some(cookie) = jar.get(&state.config.auth.cookie_name) {
        if let Err(e) = delete_session(&state.db, &hash_token(cookie.value())).await {
            tracing::warn!(error = %e, "Failed to delete session row on logout");
        }
        jar.remove(
            Cookie::build((state.config.auth.cookie_name.clone(), ""))
                .path("/")
                .build(),
        )
    } else {
        jar
    };

    (jar, Redirect::to("/login"))
}

/// How an unauthenticated request should be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// Browser navigation: send to the login page
    RedirectToLogin,
    /// Programmatic request: structured 401
    Unauthenticated,
    /// Session lookup hit a store failure
    StoreError,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::RedirectToLogin => Redirect::to("/login").into_response(),
            AuthRejection::Unauthenticated => ApiError::unauthenticated().into_response(),
            AuthRejection::StoreError => ApiError::store_unavailable().into_response(),
        }
    }
}

/// True when the request is a browser navigation rather than a
/// programmatic call. Decided by content negotiation, never by path.
fn wants_html(headers: &HeaderMap) -> bool {
    if headers.contains_key("x-requested-with") {
        return false;
    }
    let accept = headers
        .get("accept")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    accept.contains("text/html") && !accept.contains("application/json")
}

fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = CookieJar::from_headers(headers).get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    // Bearer token fallback for programmatic clients
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// The authenticated user behind the current request. Protected handlers
/// take this as an extractor; extraction failing is the only way an
/// unauthenticated request reaches them.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let browser = wants_html(&parts.headers);
        let reject = if browser {
            AuthRejection::RedirectToLogin
        } else {
            AuthRejection::Unauthenticated
        };

        let token =
            extract_token(&parts.headers, &state.config.auth.cookie_name).ok_or(reject)?;

        let user = find_session_user(&state.db, &hash_token(&token))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Session lookup failed");
                AuthRejection::StoreError
            })?;

        user.map(CurrentUser).ok_or(reject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::test_pool;
    use axum::http::{Request, StatusCode};

    async fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(Config::default(), test_pool().await))
    }

    fn signup_req(name: &str, email: &str, password: &str) -> Json<SignupRequest> {
        Json(SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    fn login_req(email: &str, password: &str) -> Json<LoginRequest> {
        Json(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    async fn extract(
        state: &Arc<AppState>,
        headers: &[(&str, &str)],
    ) -> Result<CurrentUser, AuthRejection> {
        let mut builder = Request::builder().uri("/api/mood");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        CurrentUser::from_request_parts(&mut parts, state).await
    }

    #[test]
    fn password_hashing_is_salted_and_verifiable() {
        let h1 = hash_password("pw123").unwrap();
        let h2 = hash_password("pw123").unwrap();
        assert_ne!(h1, h2);
        assert_ne!(h1, "pw123");
        assert!(verify_password("pw123", &h1));
        assert!(!verify_password("wrongpw", &h1));
        assert!(!verify_password("pw123", "not-a-phc-string"));
    }

    #[test]
    fn token_hash_is_stable_hex() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert_eq!(hash_token(&token), hash_token(&token));
        assert_ne!(hash_token(&token), token);
    }

    #[tokio::test]
    async fn signup_then_login_succeeds() {
        let state = test_state().await;

        signup(State(state.clone()), signup_req("Alice", "alice@x.com", "pw123"))
            .await
            .unwrap();

        let (jar, Json(body)) = login(
            State(state.clone()),
            CookieJar::new(),
            login_req("alice@x.com", "pw123"),
        )
        .await
        .unwrap();

        assert!(body.success);
        assert_eq!(body.user.email, "alice@x.com");
        assert!(jar.get("mindwell_session").is_some());
    }

    #[tokio::test]
    async fn signup_requires_all_fields() {
        let state = test_state().await;

        let err = signup(State(state.clone()), signup_req("  ", "a@x.com", "pw"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = signup(State(state.clone()), signup_req("A", "not-an-email", "pw"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = signup(State(state), signup_req("A", "a@x.com", "   "))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_fields_get_validation_errors_not_serde_rejections() {
        let state = test_state().await;

        // Absent fields deserialize to empty strings and fall to the
        // validators, keeping the standard error envelope
        let request: SignupRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"pw"}"#).unwrap();
        let err = signup(State(state.clone()), Json(request)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Name is required.");

        let request: LoginRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        let err = login(State(state), CookieJar::new(), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Invalid email or password.");
    }

    #[test]
    fn browser_rejection_redirects_with_see_other() {
        let resp = AuthRejection::RedirectToLogin.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("location").unwrap(), "/login");
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts_and_preserves_original() {
        let state = test_state().await;

        signup(State(state.clone()), signup_req("Alice", "alice@x.com", "pw123"))
            .await
            .unwrap();
        let err = signup(State(state.clone()), signup_req("Eve", "alice@x.com", "other"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        // The original credentials still work
        login(
            State(state),
            CookieJar::new(),
            login_req("alice@x.com", "pw123"),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let state = test_state().await;

        signup(State(state.clone()), signup_req("Alice", "alice@x.com", "pw123"))
            .await
            .unwrap();

        let wrong_pw = login(
            State(state.clone()),
            CookieJar::new(),
            login_req("alice@x.com", "wrongpw"),
        )
        .await
        .unwrap_err();
        let unknown = login(
            State(state),
            CookieJar::new(),
            login_req("nobody@x.com", "whatever"),
        )
        .await
        .unwrap_err();

        assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_pw.message(), unknown.message());
        assert_eq!(wrong_pw.message(), "Invalid email or password.");
    }

    #[tokio::test]
    async fn guard_rejects_without_session() {
        let state = test_state().await;

        // Programmatic request: structured 401
        let err = extract(&state, &[("accept", "application/json")])
            .await
            .unwrap_err();
        assert_eq!(err, AuthRejection::Unauthenticated);

        // Browser navigation: redirect to login
        let err = extract(&state, &[("accept", "text/html,application/xhtml+xml")])
            .await
            .unwrap_err();
        assert_eq!(err, AuthRejection::RedirectToLogin);

        // Garbage token is as good as none
        let err = extract(
            &state,
            &[("cookie", "mindwell_session=bogus"), ("accept", "application/json")],
        )
        .await
        .unwrap_err();
        assert_eq!(err, AuthRejection::Unauthenticated);
    }

    #[tokio::test]
    async fn guard_accepts_cookie_and_bearer_until_logout() {
        let state = test_state().await;

        signup(State(state.clone()), signup_req("Alice", "alice@x.com", "pw123"))
            .await
            .unwrap();
        let (jar, _) = login(
            State(state.clone()),
            CookieJar::new(),
            login_req("alice@x.com", "pw123"),
        )
        .await
        .unwrap();
        let token = jar.get("mindwell_session").unwrap().value().to_string();

        let cookie_header = format!("mindwell_session={}", token);
        let user = extract(&state, &[("cookie", &cookie_header)]).await.unwrap();
        assert_eq!(user.email(), "alice@x.com");

        let bearer = format!("Bearer {}", token);
        let user = extract(&state, &[("authorization", &bearer)]).await.unwrap();
        assert_eq!(user.name(), "Alice");

        // Logout kills the session for both transports
        logout(State(state.clone()), jar).await;
        let err = extract(&state, &[("cookie", &cookie_header)]).await.unwrap_err();
        assert_eq!(err, AuthRejection::Unauthenticated);
    }
}
