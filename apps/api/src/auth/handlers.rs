//! Axum route handlers for the Auth API.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::bearer_token;
use crate::auth::{AuthSession, Session, SignUpOutcome};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentSessionResponse {
    pub signed_in: bool,
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
}

/// POST /api/v1/auth/signup
///
/// Depending on configuration the account is signed in immediately or waits
/// for email confirmation.
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SignUpOutcome>), AppError> {
    let outcome = state.sessions.sign_up(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<Session>, AppError> {
    let session = state.sessions.sign_in(&req.email, &req.password).await?;
    info!("User {} signed in", session.user_id);
    Ok(Json(session))
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<StatusCode, AppError> {
    state.sessions.sign_out(&session.token).await?;
    info!("User {} signed out", session.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
///
/// Anonymous or expired callers get `signed_in: false`. A session backend
/// failure is an error, not a sign-out.
pub async fn handle_current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CurrentSessionResponse>, AppError> {
    let session = match bearer_token(&headers) {
        Some(token) => state.sessions.current_session(&token).await?,
        None => None,
    };
    Ok(Json(match session {
        Some(s) => CurrentSessionResponse {
            signed_in: true,
            user_id: Some(s.user_id),
            email: Some(s.email),
        },
        None => CurrentSessionResponse {
            signed_in: false,
            user_id: None,
            email: None,
        },
    }))
}
