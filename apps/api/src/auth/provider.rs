use async_trait::async_trait;
use redis::Client as RedisClient;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{
    check_password, new_session_token, normalize_email, AuthError, Session, SessionProvider,
    SignUpOutcome,
};
use crate::models::user::UserRow;

/// Users live in PostgreSQL; session tokens live in Redis with a TTL.
#[derive(Clone)]
pub struct PgSessionProvider {
    pool: PgPool,
    redis: RedisClient,
    session_ttl_secs: u64,
    require_email_confirmation: bool,
}

/// Value stored under `session:<token>`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user_id: Uuid,
    email: String,
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

impl From<redis::RedisError> for AuthError {
    fn from(e: redis::RedisError) -> Self {
        AuthError::Backend(format!("redis: {e}"))
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        AuthError::Backend(format!("database: {e}"))
    }
}

/// A concurrent sign-up can win the race between the lookup and the insert;
/// the loser sees the `users.email` unique violation.
fn registration_error(e: sqlx::Error) -> AuthError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
        _ => AuthError::from(e),
    }
}

impl PgSessionProvider {
    pub fn new(
        pool: PgPool,
        redis: RedisClient,
        session_ttl_secs: u64,
        require_email_confirmation: bool,
    ) -> Self {
        Self {
            pool,
            redis,
            session_ttl_secs,
            require_email_confirmation,
        }
    }

    async fn open_session(&self, user_id: Uuid, email: &str) -> Result<Session, AuthError> {
        let token = new_session_token();
        let payload = serde_json::to_string(&StoredSession {
            user_id,
            email: email.to_string(),
        })
        .map_err(|e| AuthError::Backend(e.to_string()))?;

        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(session_key(&token))
            .arg(payload)
            .arg("EX")
            .arg(self.session_ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;

        info!("Opened session for user {user_id}");
        Ok(Session {
            token,
            user_id,
            email: email.to_string(),
        })
    }
}

#[async_trait]
impl SessionProvider for PgSessionProvider {
    async fn current_session(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(session_key(token))
            .query_async::<_, Option<String>>(&mut conn)
            .await?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => Ok(Some(Session {
                token: token.to_string(),
                user_id: stored.user_id,
                email: stored.email,
            })),
            Err(e) => {
                warn!("Discarding unreadable session payload: {e}");
                Ok(None)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email)?;
        let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        if self.require_email_confirmation && !user.email_confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        self.open_session(user.id, &user.email).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let email = normalize_email(email)?;
        check_password(password)?;

        let taken: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, email_confirmed) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(&email)
        .bind(hash_password(password)?)
        .bind(!self.require_email_confirmation)
        .execute(&self.pool)
        .await
        .map_err(registration_error)?;

        info!("Registered user {user_id}");

        if self.require_email_confirmation {
            return Ok(SignUpOutcome::ConfirmationRequired { user_id });
        }
        let session = self.open_session(user_id, &email).await?;
        Ok(SignUpOutcome::SignedIn { session })
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        redis::cmd("DEL")
            .arg(session_key(token))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}
