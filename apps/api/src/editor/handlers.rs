//! Axum route handlers for the Dashboard and Editor API.

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::document::ResumeDocument;
use crate::editor::{
    dashboard, delete_resume, load, save, Confirmation, Dashboard, DeleteOutcome, EditorState,
    EditorTarget, InvalidTarget,
};
use crate::errors::AppError;
use crate::export::{project, PreviewMode, PrintLayout};
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub document: ResumeDocument,
}

#[derive(Debug, Serialize)]
pub struct EditorResponse {
    #[serde(flatten)]
    pub editor: EditorState,
    pub preview: PrintLayout,
    pub preview_mode: PreviewMode,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: Uuid,
    pub outcome: DeleteOutcome,
}

/// The HTTP form of the delete prompt: the client has already asked the user
/// and reports the answer as `confirm=true`.
struct ConfirmFlag(bool);

#[async_trait]
impl Confirmation for ConfirmFlag {
    async fn confirm(&self, _resume_id: Uuid) -> bool {
        self.0
    }
}

fn parse_target(raw: &str) -> Result<EditorTarget, AppError> {
    raw.parse()
        .map_err(|e: InvalidTarget| AppError::NotFound(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes?q=term
///
/// Newest first, filtered by title. Never fails on a store error; the list
/// comes back empty instead.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Query(query): Query<SearchQuery>,
) -> Json<Dashboard> {
    Json(dashboard(state.store.as_ref(), session.user_id, &query.q).await)
}

/// GET /api/v1/editor/:target
///
/// `:target` is a record id or `new`. Returns the document plus its live preview.
pub async fn handle_open_editor(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(target): Path<String>,
) -> Result<Json<EditorResponse>, AppError> {
    let target = parse_target(&target)?;
    let editor = load(state.store.as_ref(), session.user_id, target).await?;
    let preview = project(&editor.document);
    Ok(Json(EditorResponse {
        editor,
        preview,
        preview_mode: PreviewMode::Live,
    }))
}

/// PUT /api/v1/editor/:target
///
/// Saving `new` creates a record (201); saving an id overwrites it (200).
pub async fn handle_save(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(target): Path<String>,
    Json(req): Json<SaveRequest>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let target = parse_target(&target)?;
    let record = save(state.store.as_ref(), session.user_id, target, &req.document).await?;
    let status = match target {
        EditorTarget::New => StatusCode::CREATED,
        EditorTarget::Existing(_) => StatusCode::OK,
    };
    Ok((status, Json(record)))
}

/// DELETE /api/v1/resumes/:id?confirm=true
///
/// Without `confirm=true` nothing is deleted and 409 CONFIRMATION_REQUIRED is returned.
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse>, AppError> {
    let outcome = delete_resume(
        state.store.as_ref(),
        session.user_id,
        id,
        &ConfirmFlag(query.confirm),
    )
    .await?;

    match outcome {
        DeleteOutcome::Cancelled => Err(AppError::ConfirmationRequired),
        DeleteOutcome::Deleted => Ok(Json(DeleteResponse { id, outcome })),
    }
}
