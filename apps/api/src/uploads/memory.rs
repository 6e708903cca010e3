use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use crate::uploads::{ImageUploader, UploadError};

/// Keeps uploaded objects in memory; can be told to fail.
#[derive(Default)]
pub struct InMemoryUploader {
    objects: Mutex<HashMap<String, Bytes>>,
    fail: bool,
}

impl InMemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn stored(&self, path: &str) -> Option<Bytes> {
        self.objects.lock().await.get(path).cloned()
    }
}

#[async_trait]
impl ImageUploader for InMemoryUploader {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        _content_type: &str,
    ) -> Result<String, UploadError> {
        if self.fail {
            return Err(UploadError::Storage("bucket unavailable".to_string()));
        }
        self.objects.lock().await.insert(path.to_string(), bytes);
        Ok(format!("memory://{path}"))
    }
}
