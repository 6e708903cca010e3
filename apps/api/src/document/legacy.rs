//! Reading stored content blobs, including the flat schema written by the
//! first editor iteration.
//!
//! Legacy blobs look like
//! `{ title, fullName, email, phone, summary, education, experience, skills }`
//! with free-text sections and comma-joined skills. They are upgraded on read
//! and written back in canonical form on the next save.

use serde::Deserialize;
use serde_json::Value;

use crate::document::edit::DocumentError;
use crate::document::model::{EducationEntry, ExperienceEntry, PersonalInfo, ResumeDocument, Skills};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyDocument {
    title: Option<String>,
    full_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    summary: Option<String>,
    education: Option<String>,
    experience: Option<String>,
    skills: Option<String>,
}

impl From<LegacyDocument> for ResumeDocument {
    fn from(legacy: LegacyDocument) -> Self {
        let experience = non_blank(legacy.experience)
            .map(|text| {
                vec![ExperienceEntry {
                    description: text,
                    ..ExperienceEntry::default()
                }]
            })
            .unwrap_or_default();

        let education = non_blank(legacy.education)
            .map(|text| {
                vec![EducationEntry {
                    degree: text,
                    ..EducationEntry::default()
                }]
            })
            .unwrap_or_default();

        ResumeDocument {
            title: legacy.title.unwrap_or_default(),
            personal_info: PersonalInfo {
                full_name: legacy.full_name.unwrap_or_default(),
                email: legacy.email.unwrap_or_default(),
                phone: legacy.phone.unwrap_or_default(),
                ..PersonalInfo::default()
            },
            summary: legacy.summary.unwrap_or_default(),
            experience,
            education,
            skills: Skills::Text(legacy.skills.unwrap_or_default()),
        }
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Decodes a persisted `content` blob into the canonical document.
///
/// Objects carrying `personalInfo` are canonical; any other object is read as
/// the legacy flat schema. Non-objects are rejected.
pub fn read_stored(content: &Value) -> Result<ResumeDocument, DocumentError> {
    let Some(object) = content.as_object() else {
        return Err(DocumentError::MalformedContent(format!(
            "expected an object, found {}",
            json_kind(content)
        )));
    };

    if object.contains_key("personalInfo") {
        return ResumeDocument::deserialize(content)
            .map_err(|e| DocumentError::MalformedContent(e.to_string()));
    }

    LegacyDocument::deserialize(content)
        .map(ResumeDocument::from)
        .map_err(|e| DocumentError::MalformedContent(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_canonical_document() {
        let doc = read_stored(&json!({
            "personalInfo": { "fullName": "Jane Doe", "role": "Engineer" },
            "experience": [{ "company": "Acme", "startYear": "2019" }],
            "skills": ["Rust"]
        }))
        .unwrap();
        assert_eq!(doc.personal_info.full_name, "Jane Doe");
        assert_eq!(doc.experience[0].company, "Acme");
        assert_eq!(doc.experience[0].start_year, "2019");
        assert_eq!(doc.skills, Skills::List(vec!["Rust".to_string()]));
    }

    #[test]
    fn test_upgrades_legacy_document() {
        let doc = read_stored(&json!({
            "title": "My Resume",
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phone": "555-0100",
            "summary": "Builder of things",
            "education": "BSc, State University (2018)",
            "experience": "",
            "skills": "React, Bootstrap, Supabase"
        }))
        .unwrap();
        assert_eq!(doc.title, "My Resume");
        assert_eq!(doc.personal_info.full_name, "Jane Doe");
        assert_eq!(doc.personal_info.phone, "555-0100");
        assert_eq!(doc.summary, "Builder of things");
        assert!(doc.experience.is_empty());
        assert_eq!(doc.education.len(), 1);
        assert_eq!(doc.education[0].degree, "BSc, State University (2018)");
        assert_eq!(doc.skills.items(), vec!["React", "Bootstrap", "Supabase"]);
    }

    #[test]
    fn test_empty_object_reads_as_legacy_blank() {
        let doc = read_stored(&json!({})).unwrap();
        assert_eq!(doc.personal_info, PersonalInfo::default());
        assert!(doc.skills.items().is_empty());
    }

    #[test]
    fn test_rejects_non_object() {
        let err = read_stored(&json!(["not", "a", "resume"])).unwrap_err();
        assert!(matches!(err, DocumentError::MalformedContent(msg) if msg.contains("an array")));
    }

    #[test]
    fn test_rejects_wrong_canonical_shape() {
        let err = read_stored(&json!({ "personalInfo": "Jane" })).unwrap_err();
        assert!(matches!(err, DocumentError::MalformedContent(_)));
    }
}
