pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::document::handlers as documents;
use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::state::AppState;
use crate::uploads::handlers as uploads;

/// Headroom for multipart framing and the optional `document` part.
const MULTIPART_OVERHEAD: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_image_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/signin", post(auth::handle_sign_in))
        .route("/api/v1/auth/signout", post(auth::handle_sign_out))
        .route("/api/v1/auth/session", get(auth::handle_current_session))
        // Dashboard
        .route("/api/v1/resumes", get(editor::handle_dashboard))
        .route(
            "/api/v1/resumes/:id",
            axum::routing::delete(editor::handle_delete),
        )
        .route("/api/v1/resumes/:id/export", get(export::handle_export))
        // Editor
        .route(
            "/api/v1/editor/:target",
            get(editor::handle_open_editor).put(editor::handle_save),
        )
        .route("/api/v1/documents/blank", get(documents::handle_blank))
        .route("/api/v1/documents/edit", post(documents::handle_edit))
        // Preview
        .route("/api/v1/preview", post(export::handle_preview))
        .route("/api/v1/preview/html", post(export::handle_preview_html))
        // Uploads
        .route(
            "/api/v1/uploads/profile-image",
            post(uploads::handle_profile_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
