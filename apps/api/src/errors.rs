use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::document::DocumentError;
use crate::store::StoreError;
use crate::uploads::UploadError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Deletion must be confirmed")]
    ConfirmationRequired,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => AppError::NotFound(e.to_string()),
            StoreError::Persistence(msg) => AppError::Persistence(msg),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::IndexOutOfRange { .. } => AppError::IndexOutOfRange(e.to_string()),
            DocumentError::UnknownField(_) => AppError::Validation(e.to_string()),
            DocumentError::MalformedContent(msg) => AppError::Persistence(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::IndexOutOfRange(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INDEX_OUT_OF_RANGE",
                msg.clone(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Auth(e) => match e {
                AuthError::InvalidCredentials | AuthError::EmailNotConfirmed => {
                    (StatusCode::UNAUTHORIZED, "AUTH_ERROR", e.to_string())
                }
                AuthError::EmailTaken => (StatusCode::CONFLICT, "AUTH_ERROR", e.to_string()),
                AuthError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                AuthError::Backend(msg) => {
                    tracing::error!("Session backend error: {msg}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "AUTH_ERROR",
                        "Authentication is temporarily unavailable".to_string(),
                    )
                }
            },
            AppError::Upload(e) => match e {
                UploadError::TooLarge { .. } => {
                    (StatusCode::PAYLOAD_TOO_LARGE, "UPLOAD_ERROR", e.to_string())
                }
                UploadError::UnsupportedType(_) | UploadError::Empty => {
                    (StatusCode::BAD_REQUEST, "UPLOAD_ERROR", e.to_string())
                }
                UploadError::Storage(msg) => {
                    tracing::error!("Upload error: {msg}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPLOAD_ERROR",
                        "The image could not be uploaded".to_string(),
                    )
                }
            },
            AppError::Persistence(msg) => {
                tracing::error!("Persistence error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "The resume could not be saved or loaded".to_string(),
                )
            }
            AppError::ConfirmationRequired => (
                StatusCode::CONFLICT,
                "CONFIRMATION_REQUIRED",
                "This resume will be permanently deleted. Repeat the request with confirm=true."
                    .to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::edit::ListName;
    use uuid::Uuid;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let response = AppError::from(StoreError::NotFound(Uuid::nil())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_index_out_of_range_maps_to_422() {
        let err = DocumentError::IndexOutOfRange {
            list: ListName::Experience,
            index: 4,
            len: 1,
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_auth_errors() {
        let response = AppError::from(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let response = AppError::from(AuthError::EmailTaken).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_upload_storage_failure_is_bad_gateway() {
        let response = AppError::from(UploadError::Storage("down".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
