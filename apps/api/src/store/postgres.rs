use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::document::ResumeDocument;
use crate::models::resume::{ResumeRecord, ResumeRow};
use crate::store::{ResumeStore, StoreError};

/// PostgreSQL-backed store. Every statement filters on `owner_id`.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        error!("Database error: {e}");
        StoreError::Persistence(e.to_string())
    }
}

fn decode(row: ResumeRow) -> Result<ResumeRecord, StoreError> {
    let id = row.id;
    ResumeRecord::try_from(row).map_err(|e| {
        error!("Resume {id} has unreadable content: {e}");
        StoreError::Persistence(e.to_string())
    })
}

/// Decodes a listing, leaving out rows whose content cannot be read so one
/// bad blob does not hide the rest of the owner's resumes.
fn decode_listing(rows: Vec<ResumeRow>) -> Vec<ResumeRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            ResumeRecord::try_from(row)
                .map_err(|e| warn!("Skipping resume {id} in listing: {e}"))
                .ok()
        })
        .collect()
}

fn encode(content: &ResumeDocument) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(content).map_err(|e| StoreError::Persistence(e.to_string()))
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<ResumeRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(decode_listing(rows))
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<ResumeRecord, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        decode(row)
    }

    async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &ResumeDocument,
    ) -> Result<ResumeRecord, StoreError> {
        let id = Uuid::new_v4();
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, owner_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .bind(encode(content)?)
        .fetch_one(&self.pool)
        .await?;

        info!("Created resume {id} for user {owner_id}");
        decode(row)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        title: &str,
        content: &ResumeDocument,
    ) -> Result<ResumeRecord, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET title = $3, content = $4, updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .bind(encode(content)?)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        info!("Updated resume {id} for user {owner_id}");
        decode(row)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!("Deleted resume {id} for user {owner_id}");
        Ok(())
    }
}
