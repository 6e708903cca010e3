use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Full `users` row. Never serialized: carries the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
}
