//! Dashboard view logic over an owner's resume list.
//!
//! Input arrives newest-first from the store. Nothing here re-sorts.

use serde::Serialize;

use crate::models::resume::ResumeRecord;

/// Shown on a dashboard card when a record has no title.
pub const UNTITLED_CARD: &str = "Untitled Resume";

/// Case-insensitive substring match on `title` only. An empty term keeps
/// every record. Relative order is preserved.
pub fn filter_by_title(records: Vec<ResumeRecord>, term: &str) -> Vec<ResumeRecord> {
    if term.is_empty() {
        return records;
    }
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.title.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyState {
    NoResumes,
    NoMatches { term: String },
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::NoResumes => "No resumes yet. Create your first one.".to_string(),
            EmptyState::NoMatches { term } => format!("No results found for \"{term}\""),
        }
    }
}

/// Picks the dashboard's empty-state message, if any.
pub fn empty_state(total: usize, shown: usize, term: &str) -> Option<EmptyState> {
    if shown > 0 {
        return None;
    }
    // Same emptiness rule as `filter_by_title`: whitespace is a real term.
    if total > 0 && !term.is_empty() {
        return Some(EmptyState::NoMatches {
            term: term.to_string(),
        });
    }
    if total == 0 {
        return Some(EmptyState::NoResumes);
    }
    None
}

pub fn card_title(title: &str) -> &str {
    if title.trim().is_empty() {
        UNTITLED_CARD
    } else {
        title
    }
}
