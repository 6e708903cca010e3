//! Resume Store — owner-scoped persistence for resume records.
//!
//! Every operation takes the caller's user id. Records owned by someone else
//! are indistinguishable from records that do not exist: both are `NotFound`.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`; production wires `PgResumeStore`,
//! tests wire the in-memory store.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::document::ResumeDocument;
use crate::models::resume::ResumeRecord;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::InMemoryResumeStore;
pub use postgres::PgResumeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Resume {0} not found")]
    NotFound(Uuid),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// All records owned by `owner_id`, newest `created_at` first.
    async fn list(&self, owner_id: Uuid) -> Result<Vec<ResumeRecord>, StoreError>;

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<ResumeRecord, StoreError>;

    /// Assigns `id` and `created_at`.
    async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &ResumeDocument,
    ) -> Result<ResumeRecord, StoreError>;

    /// Replaces title and content. `id`, `owner_id` and `created_at` never change.
    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        title: &str,
        content: &ResumeDocument,
    ) -> Result<ResumeRecord, StoreError>;

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError>;
}
