use crate::export::projection::{display_name, LayoutSection, PreviewMode, PrintLayout};

const PRINT_CSS: &str = "@page { size: A4; margin: 18mm; }\
body { font-family: Georgia, serif; color: #000; max-width: 210mm; margin: 0 auto; }\
h1 { text-align: center; text-transform: uppercase; margin: 0; }\
h2 { text-transform: uppercase; border-bottom: 1px solid #000; font-size: 1rem; }\
.role, .contact { text-align: center; margin: 0.2rem 0; }\
.avatar { display: block; margin: 0 auto 0.5rem; width: 96px; height: 96px; object-fit: cover; border-radius: 50%; }\
.entry { margin-bottom: 0.6rem; }\
.period { float: right; }\
.description { white-space: pre-line; }";

/// Renders a print layout as a standalone HTML page ready for the browser's
/// print dialog.
pub fn render_html(layout: &PrintLayout, mode: PreviewMode) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");

    let title = layout
        .header()
        .map(|h| display_name(h, mode))
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Resume");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str(&format!("<style>{PRINT_CSS}</style>\n</head>\n<body>\n"));

    for section in &layout.sections {
        match section {
            LayoutSection::Header(header) => {
                html.push_str("<header>\n");
                if let Some(url) = &header.image_url {
                    html.push_str(&format!(
                        "<img class=\"avatar\" src=\"{}\" alt=\"\">\n",
                        escape(url)
                    ));
                }
                html.push_str(&format!("<h1>{}</h1>\n", escape(display_name(header, mode))));
                if !header.role.is_empty() {
                    html.push_str(&format!("<p class=\"role\">{}</p>\n", escape(&header.role)));
                }
                html.push_str(&format!(
                    "<p class=\"contact\">{}</p>\n</header>\n",
                    escape(&header.contact)
                ));
            }
            LayoutSection::Summary { text } => {
                html.push_str("<section>\n<h2>Profile Summary</h2>\n");
                html.push_str(&format!("<p>{}</p>\n</section>\n", escape(text)));
            }
            LayoutSection::Experience { entries } => {
                html.push_str("<section>\n<h2>Experience</h2>\n");
                for entry in entries {
                    html.push_str("<div class=\"entry\">\n");
                    html.push_str(&format!(
                        "<span class=\"period\">{}</span>\n<strong>{}</strong>",
                        escape(&entry.period),
                        escape(&entry.role)
                    ));
                    if !entry.company.is_empty() {
                        html.push_str(&format!(", {}", escape(&entry.company)));
                    }
                    html.push_str(&format!(
                        "\n<p class=\"description\">{}</p>\n</div>\n",
                        escape(&entry.description)
                    ));
                }
                html.push_str("</section>\n");
            }
            LayoutSection::Education { entries } => {
                html.push_str("<section>\n<h2>Education</h2>\n");
                for entry in entries {
                    html.push_str(&format!(
                        "<div class=\"entry\">\n<span class=\"period\">{}</span>\n<strong>{}</strong>",
                        escape(&entry.period),
                        escape(&entry.degree)
                    ));
                    if !entry.school.is_empty() {
                        html.push_str(&format!(", {}", escape(&entry.school)));
                    }
                    html.push_str("\n</div>\n");
                }
                html.push_str("</section>\n");
            }
            LayoutSection::Skills(skills) => {
                html.push_str("<section>\n<h2>Skills</h2>\n");
                html.push_str(&format!("<p>{}</p>\n</section>\n", escape(&skills.display)));
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::create_blank;
    use crate::document::edit::{set_field, FieldPath};
    use crate::export::projection::project;

    #[test]
    fn test_escapes_user_text() {
        let doc = set_field(&create_blank(), FieldPath::Summary, "<script>alert('x')</script>");
        let html = render_html(&project(&doc), PreviewMode::Persisted);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_live_mode_uses_placeholder() {
        let layout = project(&create_blank());
        assert!(render_html(&layout, PreviewMode::Live).contains("<h1>YOUR NAME</h1>"));
        assert!(render_html(&layout, PreviewMode::Persisted).contains("<h1></h1>"));
    }

    #[test]
    fn test_sections_render_in_order() {
        let doc = set_field(&create_blank(), FieldPath::FullName, "Jane Doe");
        let doc = set_field(&doc, FieldPath::Skills, "Rust, SQL");
        let html = render_html(&project(&doc), PreviewMode::Persisted);
        let summary = html.find("Profile Summary").unwrap();
        let experience = html.find("<h2>Experience</h2>").unwrap();
        let education = html.find("<h2>Education</h2>").unwrap();
        let skills = html.find("<h2>Skills</h2>").unwrap();
        assert!(summary < experience && experience < education && education < skills);
        assert!(html.contains("<title>Jane Doe</title>"));
        assert!(html.contains("Rust • SQL"));
    }
}
