//! Print Layout — a pure projection of `ResumeDocument` into render-ready sections.
//!
//! # Section order
//! Header, Summary, Experience, Education, Skills. Always all five, always in
//! this order, even when a section is empty.
//!
//! # Placeholders
//! The projection never invents text. The "YOUR NAME" affordance belongs to the
//! live editor preview and is applied by `display_name` at render time.

use serde::{Deserialize, Serialize};

use crate::document::{EducationEntry, ExperienceEntry, ResumeDocument};

/// Separator between start and end year.
pub const YEAR_RANGE_SEPARATOR: &str = " – ";
/// Separator between contact items in the header.
pub const CONTACT_SEPARATOR: &str = " | ";
/// Separator used when skills are joined for display.
pub const SKILL_SEPARATOR: &str = " • ";
/// Shown in place of an empty name while a resume is being edited.
pub const NAME_PLACEHOLDER: &str = "YOUR NAME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub name: String,
    pub role: String,
    pub contact: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceBlock {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationBlock {
    pub degree: String,
    pub school: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsBlock {
    pub items: Vec<String>,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum LayoutSection {
    Header(HeaderBlock),
    Summary { text: String },
    Experience { entries: Vec<ExperienceBlock> },
    Education { entries: Vec<EducationBlock> },
    Skills(SkillsBlock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintLayout {
    pub sections: Vec<LayoutSection>,
}

impl PrintLayout {
    pub fn header(&self) -> Option<&HeaderBlock> {
        self.sections.iter().find_map(|s| match s {
            LayoutSection::Header(h) => Some(h),
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn skills(&self) -> Option<&SkillsBlock> {
        self.sections.iter().find_map(|s| match s {
            LayoutSection::Skills(s) => Some(s),
            _ => None,
        })
    }
}

/// Whether the layout is shown inside the live editor or exported from a
/// saved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    Live,
    Persisted,
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

pub fn project(doc: &ResumeDocument) -> PrintLayout {
    let info = &doc.personal_info;
    let image_url = Some(info.profile_image_url.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    let header = HeaderBlock {
        name: info.full_name.clone(),
        role: info.role.clone(),
        contact: join_non_empty(&[info.email.as_str(), info.phone.as_str()], CONTACT_SEPARATOR),
        image_url,
    };

    let items = doc.skills.items();
    let skills = SkillsBlock {
        display: items.join(SKILL_SEPARATOR),
        items,
    };

    PrintLayout {
        sections: vec![
            LayoutSection::Header(header),
            LayoutSection::Summary {
                text: doc.summary.clone(),
            },
            LayoutSection::Experience {
                entries: doc.experience.iter().map(project_experience).collect(),
            },
            LayoutSection::Education {
                entries: doc.education.iter().map(project_education).collect(),
            },
            LayoutSection::Skills(skills),
        ],
    }
}

/// Name to print in the header for the given context.
pub fn display_name(header: &HeaderBlock, mode: PreviewMode) -> &str {
    match mode {
        PreviewMode::Live if header.name.trim().is_empty() => NAME_PLACEHOLDER,
        _ => &header.name,
    }
}

fn project_experience(entry: &ExperienceEntry) -> ExperienceBlock {
    ExperienceBlock {
        role: entry.role.clone(),
        company: entry.company.clone(),
        period: year_range(&entry.start_year, &entry.end_year),
        description: entry.description.clone(),
    }
}

fn project_education(entry: &EducationEntry) -> EducationBlock {
    EducationBlock {
        degree: entry.degree.clone(),
        school: entry.school.clone(),
        period: year_range(&entry.start_year, &entry.end_year),
    }
}

fn year_range(start: &str, end: &str) -> String {
    join_non_empty(&[start, end], YEAR_RANGE_SEPARATOR)
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_blank;
    use crate::document::edit::{add_list_entry, set_field, update_list_entry, FieldPath, ListName};
    use crate::document::model::Skills;

    fn filled() -> ResumeDocument {
        let doc = set_field(&create_blank(), FieldPath::FullName, "Jane Doe");
        let doc = set_field(&doc, FieldPath::Role, "Platform Engineer");
        let doc = set_field(&doc, FieldPath::Email, "jane@example.com");
        let doc = set_field(&doc, FieldPath::Phone, "555-0100");
        let doc = add_list_entry(&doc, ListName::Experience);
        let doc = update_list_entry(&doc, ListName::Experience, 0, "role", "SRE").unwrap();
        let doc = update_list_entry(&doc, ListName::Experience, 0, "company", "Acme").unwrap();
        let doc = update_list_entry(&doc, ListName::Experience, 0, "startYear", "2019").unwrap();
        let doc = update_list_entry(&doc, ListName::Experience, 0, "endYear", "2023").unwrap();
        let doc = add_list_entry(&doc, ListName::Education);
        let doc = update_list_entry(&doc, ListName::Education, 0, "school", "MIT").unwrap();
        update_list_entry(&doc, ListName::Education, 0, "startYear", "2014").unwrap()
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let layout = project(&create_blank());
        let kinds: Vec<&str> = layout
            .sections
            .iter()
            .map(|s| match s {
                LayoutSection::Header(_) => "header",
                LayoutSection::Summary { .. } => "summary",
                LayoutSection::Experience { .. } => "experience",
                LayoutSection::Education { .. } => "education",
                LayoutSection::Skills(_) => "skills",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["header", "summary", "experience", "education", "skills"]
        );
    }

    #[test]
    fn test_skills_string_is_normalized() {
        let doc = set_field(&create_blank(), FieldPath::Skills, "React, Node, ");
        let layout = project(&doc);
        let skills = layout.skills().unwrap();
        assert_eq!(skills.items, vec!["React", "Node"]);
        assert_eq!(skills.display, "React • Node");
    }

    #[test]
    fn test_skills_list_is_normalized() {
        let mut doc = create_blank();
        doc.skills = Skills::List(vec![" Rust".into(), "".into(), "Go ".into()]);
        assert_eq!(project(&doc).skills().unwrap().items, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_header_and_entries() {
        let layout = project(&filled());
        let header = layout.header().unwrap();
        assert_eq!(header.name, "Jane Doe");
        assert_eq!(header.contact, "jane@example.com | 555-0100");
        assert_eq!(header.image_url, None);

        let LayoutSection::Experience { entries } = &layout.sections[2] else {
            panic!("experience section expected at index 2");
        };
        assert_eq!(entries[0].period, "2019 – 2023");
        assert_eq!(entries[0].company, "Acme");

        let LayoutSection::Education { entries } = &layout.sections[3] else {
            panic!("education section expected at index 3");
        };
        assert_eq!(entries[0].period, "2014");
        assert_eq!(entries[0].degree, "");
    }

    #[test]
    fn test_empty_name_is_not_substituted_by_projection() {
        let layout = project(&create_blank());
        let header = layout.header().unwrap();
        assert_eq!(header.name, "");
        assert_eq!(header.contact, "");
        assert_eq!(display_name(header, PreviewMode::Live), NAME_PLACEHOLDER);
        assert_eq!(display_name(header, PreviewMode::Persisted), "");
    }

    #[test]
    fn test_projection_is_deterministic() {
        let doc = filled();
        assert_eq!(project(&doc), project(&doc));
    }

    #[test]
    fn test_image_url_kept_verbatim() {
        let doc = set_field(
            &create_blank(),
            FieldPath::ProfileImageUrl,
            "https://cdn.example.com/a.png",
        );
        assert_eq!(
            project(&doc).header().unwrap().image_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }
}
