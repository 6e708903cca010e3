//! Pure update functions over `ResumeDocument`.
//!
//! Every operation takes the current document by reference and returns a new
//! value. Callers keep the input untouched, so a failed edit leaves the editor
//! exactly where it was. List edits replace the whole list with a copy that has
//! one entry added, removed or updated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::model::{EducationEntry, ExperienceEntry, ResumeDocument, Skills};

/// Title used when the document has no usable full name.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Index {index} is out of range for {list} (length {len})")]
    IndexOutOfRange {
        list: ListName,
        index: i64,
        len: usize,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Malformed resume content: {0}")]
    MalformedContent(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Addressing
// ────────────────────────────────────────────────────────────────────────────

/// Scalar fields addressable by `set_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Title,
    FullName,
    Role,
    Email,
    Phone,
    ProfileImageUrl,
    Summary,
    Skills,
}

impl FieldPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPath::Title => "title",
            FieldPath::FullName => "personalInfo.fullName",
            FieldPath::Role => "personalInfo.role",
            FieldPath::Email => "personalInfo.email",
            FieldPath::Phone => "personalInfo.phone",
            FieldPath::ProfileImageUrl => "personalInfo.profileImageUrl",
            FieldPath::Summary => "summary",
            FieldPath::Skills => "skills",
        }
    }
}

impl FromStr for FieldPath {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(FieldPath::Title),
            "personalInfo.fullName" => Ok(FieldPath::FullName),
            "personalInfo.role" => Ok(FieldPath::Role),
            "personalInfo.email" => Ok(FieldPath::Email),
            "personalInfo.phone" => Ok(FieldPath::Phone),
            "personalInfo.profileImageUrl" => Ok(FieldPath::ProfileImageUrl),
            "summary" => Ok(FieldPath::Summary),
            "skills" => Ok(FieldPath::Skills),
            other => Err(DocumentError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two repeatable sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    Experience,
    Education,
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListName::Experience => f.write_str("experience"),
            ListName::Education => f.write_str("education"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// The zero-value document a "new" editor starts from.
pub fn create_blank() -> ResumeDocument {
    ResumeDocument::default()
}

pub fn set_field(doc: &ResumeDocument, path: FieldPath, value: impl Into<String>) -> ResumeDocument {
    let value = value.into();
    let mut next = doc.clone();
    match path {
        FieldPath::Title => next.title = value,
        FieldPath::FullName => next.personal_info.full_name = value,
        FieldPath::Role => next.personal_info.role = value,
        FieldPath::Email => next.personal_info.email = value,
        FieldPath::Phone => next.personal_info.phone = value,
        FieldPath::ProfileImageUrl => next.personal_info.profile_image_url = value,
        FieldPath::Summary => next.summary = value,
        // Raw text as typed; the projection splits it.
        FieldPath::Skills => next.skills = Skills::Text(value),
    }
    next
}

/// Stores an uploaded image's public URL verbatim.
pub fn set_profile_image(doc: &ResumeDocument, url: &str) -> ResumeDocument {
    set_field(doc, FieldPath::ProfileImageUrl, url)
}

pub fn add_list_entry(doc: &ResumeDocument, list: ListName) -> ResumeDocument {
    let mut next = doc.clone();
    match list {
        ListName::Experience => next.experience.push(ExperienceEntry::default()),
        ListName::Education => next.education.push(EducationEntry::default()),
    }
    next
}

pub fn remove_list_entry(
    doc: &ResumeDocument,
    list: ListName,
    index: usize,
) -> Result<ResumeDocument, DocumentError> {
    check_index(doc, list, index)?;
    let mut next = doc.clone();
    match list {
        ListName::Experience => {
            next.experience.remove(index);
        }
        ListName::Education => {
            next.education.remove(index);
        }
    }
    Ok(next)
}

pub fn update_list_entry(
    doc: &ResumeDocument,
    list: ListName,
    index: usize,
    field: &str,
    value: impl Into<String>,
) -> Result<ResumeDocument, DocumentError> {
    check_index(doc, list, index)?;
    let value = value.into();
    let mut next = doc.clone();
    match list {
        ListName::Experience => {
            let entry = &mut next.experience[index];
            let slot = match field {
                "company" => &mut entry.company,
                "role" => &mut entry.role,
                "startYear" => &mut entry.start_year,
                "endYear" => &mut entry.end_year,
                "description" => &mut entry.description,
                other => return Err(DocumentError::UnknownField(format!("{list}.{other}"))),
            };
            *slot = value;
        }
        ListName::Education => {
            let entry = &mut next.education[index];
            let slot = match field {
                "school" => &mut entry.school,
                "degree" => &mut entry.degree,
                "startYear" => &mut entry.start_year,
                "endYear" => &mut entry.end_year,
                other => return Err(DocumentError::UnknownField(format!("{list}.{other}"))),
            };
            *slot = value;
        }
    }
    Ok(next)
}

/// Trimmed full name, or `"Untitled"`.
pub fn derive_title(doc: &ResumeDocument) -> String {
    let name = doc.personal_info.full_name.trim();
    if name.is_empty() {
        UNTITLED.to_string()
    } else {
        name.to_string()
    }
}

/// The record title to store: the explicit title when it has content,
/// otherwise `derive_title`.
pub fn resolve_title(doc: &ResumeDocument) -> String {
    let title = doc.title.trim();
    if title.is_empty() {
        derive_title(doc)
    } else {
        title.to_string()
    }
}

fn list_len(doc: &ResumeDocument, list: ListName) -> usize {
    match list {
        ListName::Experience => doc.experience.len(),
        ListName::Education => doc.education.len(),
    }
}

fn check_index(doc: &ResumeDocument, list: ListName, index: usize) -> Result<(), DocumentError> {
    let len = list_len(doc, list);
    if index >= len {
        return Err(DocumentError::IndexOutOfRange {
            list,
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        });
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Serializable edit commands
// ────────────────────────────────────────────────────────────────────────────

/// One keystroke-level edit as submitted by the editor.
///
/// Indices are signed on the wire so a negative index surfaces as
/// `IndexOutOfRange` instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    SetField {
        path: String,
        value: String,
    },
    AddEntry {
        list: ListName,
    },
    RemoveEntry {
        list: ListName,
        index: i64,
    },
    UpdateEntry {
        list: ListName,
        index: i64,
        field: String,
        value: String,
    },
}

pub fn apply_edit(doc: &ResumeDocument, op: &EditOp) -> Result<ResumeDocument, DocumentError> {
    match op {
        EditOp::SetField { path, value } => {
            let path: FieldPath = path.parse()?;
            Ok(set_field(doc, path, value.as_str()))
        }
        EditOp::AddEntry { list } => Ok(add_list_entry(doc, *list)),
        EditOp::RemoveEntry { list, index } => {
            let index = to_position(doc, *list, *index)?;
            remove_list_entry(doc, *list, index)
        }
        EditOp::UpdateEntry {
            list,
            index,
            field,
            value,
        } => {
            let index = to_position(doc, *list, *index)?;
            update_list_entry(doc, *list, index, field, value.as_str())
        }
    }
}

/// Applies edits in order. The first failure aborts the batch.
pub fn apply_edits(doc: &ResumeDocument, ops: &[EditOp]) -> Result<ResumeDocument, DocumentError> {
    ops.iter()
        .try_fold(doc.clone(), |current, op| apply_edit(&current, op))
}

fn to_position(doc: &ResumeDocument, list: ListName, index: i64) -> Result<usize, DocumentError> {
    usize::try_from(index).map_err(|_| DocumentError::IndexOutOfRange {
        list,
        index,
        len: list_len(doc, list),
    })
}
