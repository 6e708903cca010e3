//! Profile image uploads. The document only ever keeps the returned public URL.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod s3;

#[cfg(test)]
pub use memory::InMemoryUploader;
pub use s3::S3ImageUploader;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Image is empty")]
    Empty,

    #[error("Image exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Upload failed: {0}")]
    Storage(String),
}

#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Stores `bytes` under `path` and returns the object's public URL.
    async fn upload(&self, path: &str, bytes: Bytes, content_type: &str)
        -> Result<String, UploadError>;
}

fn extension_for(content_type: &str) -> Result<&'static str, UploadError> {
    match content_type {
        "image/png" => Ok("png"),
        "image/jpeg" | "image/jpg" => Ok("jpg"),
        "image/webp" => Ok("webp"),
        "image/gif" => Ok("gif"),
        other => Err(UploadError::UnsupportedType(other.to_string())),
    }
}

/// `profile-images/<user>/<uuid>.<ext>`
pub fn profile_image_key(user_id: Uuid, content_type: &str) -> Result<String, UploadError> {
    let ext = extension_for(content_type)?;
    Ok(format!("profile-images/{user_id}/{}.{ext}", Uuid::new_v4()))
}

/// Checks an image payload before anything is sent to storage.
pub fn check_image(bytes: &[u8], content_type: &str, limit: usize) -> Result<(), UploadError> {
    extension_for(content_type)?;
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > limit {
        return Err(UploadError::TooLarge { limit });
    }
    Ok(())
}
