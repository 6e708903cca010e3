//! Axum route handlers for preview and export.

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::export::{display_name, project, render_html, PreviewMode, PrintLayout};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub document: ResumeDocument,
    #[serde(default = "live")]
    pub mode: PreviewMode,
}

fn live() -> PreviewMode {
    PreviewMode::Live
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub display_name: String,
    pub layout: PrintLayout,
}

/// POST /api/v1/preview
///
/// Projects an unsaved document. Defaults to live mode, so an empty name
/// displays as the placeholder.
pub async fn handle_preview(Json(req): Json<PreviewRequest>) -> Json<PreviewResponse> {
    let layout = project(&req.document);
    let name = layout
        .header()
        .map(|h| display_name(h, req.mode).to_string())
        .unwrap_or_default();
    Json(PreviewResponse {
        display_name: name,
        layout,
    })
}

/// POST /api/v1/preview/html
pub async fn handle_preview_html(Json(req): Json<PreviewRequest>) -> Html<String> {
    Html(render_html(&project(&req.document), req.mode))
}

/// GET /api/v1/resumes/:id/export
///
/// Printable HTML of a saved resume. Saved names are printed as stored.
pub async fn handle_export(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.store.get(session.user_id, id).await?;
    let html = render_html(&project(&record.content), PreviewMode::Persisted);
    let disposition = format!("inline; filename=\"resume-{id}.html\"");
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Html(html)))
}
