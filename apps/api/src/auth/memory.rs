use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::{
    check_password, new_session_token, normalize_email, AuthError, Session, SessionProvider,
    SignUpOutcome,
};

struct Account {
    user_id: Uuid,
    password: String,
    confirmed: bool,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, Session>,
}

/// Session provider for tests. Passwords are kept in clear.
#[derive(Default)]
pub struct InMemorySessionProvider {
    inner: Mutex<Inner>,
    require_email_confirmation: bool,
    unavailable: bool,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requiring_confirmation() -> Self {
        Self {
            require_email_confirmation: true,
            ..Self::default()
        }
    }

    /// Every session lookup fails as if the token cache were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub async fn confirm_email(&self, email: &str) {
        if let Some(account) = self.inner.lock().await.accounts.get_mut(email) {
            account.confirmed = true;
        }
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn current_session(&self, token: &str) -> Result<Option<Session>, AuthError> {
        if self.unavailable {
            return Err(AuthError::Backend("session cache unreachable".to_string()));
        }
        Ok(self.inner.lock().await.sessions.get(token).cloned())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email)?;
        let mut inner = self.inner.lock().await;
        let account = inner
            .accounts
            .get(&email)
            .ok_or(AuthError::InvalidCredentials)?;
        if account.password != password {
            return Err(AuthError::InvalidCredentials);
        }
        if self.require_email_confirmation && !account.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }
        let session = Session {
            token: new_session_token(),
            user_id: account.user_id,
            email,
        };
        inner.sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let email = normalize_email(email)?;
        check_password(password)?;
        let mut inner = self.inner.lock().await;
        if inner.accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken);
        }
        let user_id = Uuid::new_v4();
        inner.accounts.insert(
            email.clone(),
            Account {
                user_id,
                password: password.to_string(),
                confirmed: !self.require_email_confirmation,
            },
        );
        if self.require_email_confirmation {
            return Ok(SignUpOutcome::ConfirmationRequired { user_id });
        }
        let session = Session {
            token: new_session_token(),
            user_id,
            email,
        };
        inner.sessions.insert(session.token.clone(), session.clone());
        Ok(SignUpOutcome::SignedIn { session })
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.inner.lock().await.sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_up_then_sign_in_and_out() {
        let provider = InMemorySessionProvider::new();
        let outcome = provider.sign_up("jane@example.com", "secret1").await.unwrap();
        let SignUpOutcome::SignedIn { session } = outcome else {
            panic!("expected immediate session");
        };
        assert!(provider
            .current_session(&session.token)
            .await
            .unwrap()
            .is_some());

        let again = provider.sign_in("JANE@example.com", "secret1").await.unwrap();
        assert_eq!(again.user_id, session.user_id);

        provider.sign_out(&again.token).await.unwrap();
        assert!(provider.current_session(&again.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let provider = InMemorySessionProvider::new();
        provider.sign_up("jane@example.com", "secret1").await.unwrap();
        assert!(matches!(
            provider.sign_in("jane@example.com", "nope123").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            provider.sign_in("who@example.com", "secret1").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_confirmation_gate() {
        let provider = InMemorySessionProvider::requiring_confirmation();
        let outcome = provider.sign_up("jane@example.com", "secret1").await.unwrap();
        assert!(matches!(outcome, SignUpOutcome::ConfirmationRequired { .. }));
        assert!(matches!(
            provider.sign_in("jane@example.com", "secret1").await,
            Err(AuthError::EmailNotConfirmed)
        ));
        provider.confirm_email("jane@example.com").await;
        assert!(provider.sign_in("jane@example.com", "secret1").await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_sign_up() {
        let provider = InMemorySessionProvider::new();
        provider.sign_up("jane@example.com", "secret1").await.unwrap();
        assert!(matches!(
            provider.sign_up("jane@example.com", "other12").await,
            Err(AuthError::EmailTaken)
        ));
    }
}
