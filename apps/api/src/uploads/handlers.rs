//! Axum route handlers for image uploads.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::auth::AuthSession;
use crate::document::{set_profile_image, ResumeDocument};
use crate::errors::AppError;
use crate::state::AppState;
use crate::uploads::{check_image, profile_image_key};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    /// Present when the request carried a `document` part: that document with
    /// `personalInfo.profileImageUrl` set to `url`.
    pub document: Option<ResumeDocument>,
}

/// POST /api/v1/uploads/profile-image
///
/// Multipart parts: `file` (required, image/png|jpeg|webp|gif) and
/// `document` (optional, JSON `ResumeDocument`).
pub async fn handle_profile_image(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(Bytes, String)> = None;
    let mut document: Option<ResumeDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read file: {e}")))?;
                file = Some((bytes, content_type));
            }
            Some("document") => {
                let raw = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read document: {e}")))?;
                let parsed = serde_json::from_slice(&raw)
                    .map_err(|e| AppError::Validation(format!("Invalid document: {e}")))?;
                document = Some(parsed);
            }
            _ => {}
        }
    }

    let (bytes, content_type) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' part".to_string()))?;
    check_image(&bytes, &content_type, state.config.max_image_bytes)?;

    let key = profile_image_key(session.user_id, &content_type)?;
    let url = state.uploader.upload(&key, bytes, &content_type).await?;
    info!("Stored profile image for user {}", session.user_id);

    Ok(Json(UploadResponse {
        document: document.map(|doc| set_profile_image(&doc, &url)),
        url,
    }))
}
