//! Axum route handlers for stateless document editing.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::document::{apply_edits, create_blank, resolve_title, EditOp, ResumeDocument};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub document: ResumeDocument,
    pub edits: Vec<EditOp>,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub document: ResumeDocument,
    pub title: String,
}

/// GET /api/v1/documents/blank
pub async fn handle_blank() -> Json<ResumeDocument> {
    Json(create_blank())
}

/// POST /api/v1/documents/edit
///
/// Applies the edits in order and returns the new document. If any edit fails
/// the whole batch is rejected and the caller keeps its previous document.
pub async fn handle_edit(Json(req): Json<EditRequest>) -> Result<Json<EditResponse>, AppError> {
    let document = apply_edits(&req.document, &req.edits)?;
    Ok(Json(EditResponse {
        title: resolve_title(&document),
        document,
    }))
}
