use std::sync::Arc;

use crate::auth::SessionProvider;
use crate::config::Config;
use crate::store::ResumeStore;
use crate::uploads::ImageUploader;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owner-scoped resume persistence. Default: PgResumeStore.
    pub store: Arc<dyn ResumeStore>,
    /// Sign-in / session lookup. Default: PgSessionProvider (users in Postgres, tokens in Redis).
    pub sessions: Arc<dyn SessionProvider>,
    /// Profile image storage. Default: S3ImageUploader.
    pub uploader: Arc<dyn ImageUploader>,
    pub config: Config,
}
