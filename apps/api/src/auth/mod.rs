//! Session Provider — sign-up, sign-in, session lookup and sign-out.
//!
//! The rest of the service only ever sees a `Session` (user id + email) handed
//! over by the `AuthSession` extractor. There is no ambient "current user".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod extract;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod password;
pub mod provider;

pub use extract::AuthSession;
#[cfg(test)]
pub use memory::InMemorySessionProvider;
pub use provider::PgSessionProvider;

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("User already registered")]
    EmailTaken,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Session backend error: {0}")]
    Backend(String),
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignUpOutcome {
    SignedIn { session: Session },
    /// The account exists but cannot sign in until the email is confirmed.
    ConfirmationRequired { user_id: Uuid },
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolves a bearer token. `None` means signed out or expired.
    async fn current_session(&self, token: &str) -> Result<Option<Session>, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;

    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;
}

/// Trims and lowercases an email, rejecting obviously unusable input.
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::InvalidInput(
            "Unable to validate email address: invalid format".to_string(),
        )),
    }
}

pub fn check_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidInput(format!(
            "Password should be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn new_session_token() -> String {
    Uuid::new_v4().simple().to_string()
}
