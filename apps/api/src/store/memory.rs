use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::ResumeDocument;
use crate::models::resume::ResumeRecord;
use crate::store::{ResumeStore, StoreError};

/// Process-local store with the same owner scoping as `PgResumeStore`.
#[derive(Default)]
pub struct InMemoryResumeStore {
    records: RwLock<Vec<ResumeRecord>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<ResumeRecord>, StoreError> {
        let records = self.records.read().await;
        // Newest insert first, so equal timestamps still come out newest-first.
        let mut owned: Vec<ResumeRecord> = records
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<ResumeRecord, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &ResumeDocument,
    ) -> Result<ResumeRecord, StoreError> {
        let now = Utc::now();
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            owner_id,
            title: title.to_string(),
            content: content.clone(),
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        title: &str,
        content: &ResumeDocument,
    ) -> Result<ResumeRecord, StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .ok_or(StoreError::NotFound(id))?;
        record.title = title.to_string();
        record.content = content.clone();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.id == id && r.owner_id == owner_id));
        if records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_blank;
    use crate::document::edit::{set_field, FieldPath};

    #[tokio::test]
    async fn test_list_is_newest_first_and_owner_scoped() {
        let store = InMemoryResumeStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let first = store.create(alice, "First", &create_blank()).await.unwrap();
        store.create(bob, "Bob's", &create_blank()).await.unwrap();
        let second = store.create(alice, "Second", &create_blank()).await.unwrap();

        let listed = store.list(alice).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(listed.iter().all(|r| r.owner_id == alice));
    }

    #[tokio::test]
    async fn test_cross_owner_access_is_not_found() {
        let store = InMemoryResumeStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let record = store.create(owner, "Mine", &create_blank()).await.unwrap();

        assert!(matches!(
            store.get(intruder, record.id).await,
            Err(StoreError::NotFound(id)) if id == record.id
        ));
        assert!(matches!(
            store.update(intruder, record.id, "Hijack", &create_blank()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(intruder, record.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.get(owner, record.id).await.unwrap().title, "Mine");
    }

    #[tokio::test]
    async fn test_update_keeps_identity_fields() {
        let store = InMemoryResumeStore::new();
        let owner = Uuid::new_v4();
        let created = store.create(owner, "Draft", &create_blank()).await.unwrap();
        let doc = set_field(&create_blank(), FieldPath::Summary, "Updated");
        let updated = store.update(owner, created.id, "Final", &doc).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.owner_id, owner);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.content.summary, "Updated");
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = InMemoryResumeStore::new();
        let owner = Uuid::new_v4();
        let record = store.create(owner, "Gone", &create_blank()).await.unwrap();
        store.delete(owner, record.id).await.unwrap();
        assert!(store.list(owner).await.unwrap().is_empty());
        assert!(matches!(
            store.delete(owner, record.id).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
