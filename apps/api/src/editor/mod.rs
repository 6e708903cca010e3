//! Editor workflow — load, save and delete orchestration over a `ResumeStore`.
//!
//! Flow: dashboard → editor(`new` | id) → edit in memory → save → dashboard.
//!
//! CRITICAL: a delete is only issued after the `Confirmation` collaborator has
//! answered. Declining leaves the store untouched.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::{create_blank, resolve_title, ResumeDocument};
use crate::listing::{empty_state, filter_by_title, EmptyState};
use crate::models::resume::{ResumeRecord, ResumeSummary};
use crate::store::{ResumeStore, StoreError};

pub mod handlers;

/// Literal route segment that opens an unsaved document.
pub const NEW_TARGET: &str = "new";

/// What an editor session is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTarget {
    New,
    Existing(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Resume {0} not found")]
pub struct InvalidTarget(pub String);

impl FromStr for EditorTarget {
    type Err = InvalidTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NEW_TARGET {
            return Ok(EditorTarget::New);
        }
        Uuid::parse_str(s)
            .map(EditorTarget::Existing)
            .map_err(|_| InvalidTarget(s.to_string()))
    }
}

impl fmt::Display for EditorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorTarget::New => f.write_str(NEW_TARGET),
            EditorTarget::Existing(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for EditorTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EditorState {
    pub target: EditorTarget,
    pub title: String,
    pub document: ResumeDocument,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub resumes: Vec<ResumeSummary>,
    pub total: usize,
    pub empty_state: Option<EmptyState>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Blocking yes/no prompt shown before a resume is deleted.
#[async_trait]
pub trait Confirmation: Send + Sync {
    async fn confirm(&self, resume_id: Uuid) -> bool;
}

// ────────────────────────────────────────────────────────────────────────────
// Workflow
// ────────────────────────────────────────────────────────────────────────────

/// Opens an editor. `New` yields a blank document without touching the store.
pub async fn load(
    store: &dyn ResumeStore,
    owner_id: Uuid,
    target: EditorTarget,
) -> Result<EditorState, StoreError> {
    match target {
        EditorTarget::New => {
            let document = create_blank();
            Ok(EditorState {
                target,
                title: resolve_title(&document),
                document,
            })
        }
        EditorTarget::Existing(id) => {
            let record = store.get(owner_id, id).await?;
            Ok(EditorState {
                target,
                title: record.title,
                document: record.content,
            })
        }
    }
}

/// Persists the document. `New` creates a record (the store assigns the id);
/// `Existing` overwrites it, last write wins. The stored title is always
/// recomputed: the explicit title if set, else the full name.
pub async fn save(
    store: &dyn ResumeStore,
    owner_id: Uuid,
    target: EditorTarget,
    document: &ResumeDocument,
) -> Result<ResumeRecord, StoreError> {
    let title = resolve_title(document);
    match target {
        EditorTarget::New => {
            let record = store.create(owner_id, &title, document).await?;
            info!("Saved new resume {} ({title})", record.id);
            Ok(record)
        }
        EditorTarget::Existing(id) => store.update(owner_id, id, &title, document).await,
    }
}

/// Lists the owner's resumes through the title filter.
///
/// A failing list degrades to an empty dashboard with a logged diagnostic.
pub async fn dashboard(store: &dyn ResumeStore, owner_id: Uuid, term: &str) -> Dashboard {
    let records = match store.list(owner_id).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Fetch error listing resumes for user {owner_id}: {e}");
            Vec::new()
        }
    };
    let total = records.len();
    let shown = filter_by_title(records, term);
    let empty_state = empty_state(total, shown.len(), term);

    Dashboard {
        resumes: shown.iter().map(ResumeSummary::from).collect(),
        total,
        message: empty_state.as_ref().map(EmptyState::message),
        empty_state,
    }
}

pub async fn delete_resume(
    store: &dyn ResumeStore,
    owner_id: Uuid,
    id: Uuid,
    confirmation: &dyn Confirmation,
) -> Result<DeleteOutcome, StoreError> {
    if !confirmation.confirm(id).await {
        info!("Deletion of resume {id} cancelled");
        return Ok(DeleteOutcome::Cancelled);
    }
    store.delete(owner_id, id).await?;
    Ok(DeleteOutcome::Deleted)
}
