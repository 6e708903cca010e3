use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Canonical document schema
// ────────────────────────────────────────────────────────────────────────────
//
// Field names are camelCase on the wire: content blobs are shared with the
// browser editor, which reads and writes them verbatim.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub full_name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub role: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub email: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub phone: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub profile_image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub company: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub role: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub start_year: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub end_year: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub school: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub degree: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub start_year: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub end_year: String,
}

/// Skills as stored: a comma-joined string from the legacy editor, or a list.
///
/// The raw form is preserved; only the export projection normalizes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skills {
    List(Vec<String>),
    Text(String),
}

impl Default for Skills {
    fn default() -> Self {
        Skills::List(Vec::new())
    }
}

impl Skills {
    /// Ordered, trimmed, non-empty skill names.
    pub fn items(&self) -> Vec<String> {
        match self {
            Skills::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Skills::List(list) => list
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// The editable content of one resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    /// Explicit record title. Empty means "use the full name".
    #[serde(default, deserialize_with = "empty_if_null")]
    pub title: String,
    #[serde(default, deserialize_with = "default_if_null")]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub summary: String,
    #[serde(default, deserialize_with = "default_if_null")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "default_if_null")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "default_if_null")]
    pub skills: Skills,
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
