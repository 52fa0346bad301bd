//! Markdown rendering for outlines.

use crate::model::DocumentOutline;

/// Render an outline as a Markdown table of contents.
///
/// The title becomes a level-one heading and every entry a bullet indented
/// two spaces per level below H1, followed by its page number.
pub fn to_markdown(outline: &DocumentOutline) -> String {
    let mut output = String::new();

    if let Some(title) = outline.title.as_deref().filter(|t| !t.is_empty()) {
        output.push_str("# ");
        output.push_str(title);
        output.push_str("\n\n");
    }

    for entry in &outline.outline {
        let indent = "  ".repeat(usize::from(entry.level.depth().saturating_sub(1)));
        output.push_str(&format!(
            "{}- {} (p. {})\n",
            indent,
            escape(&entry.text),
            entry.page
        ));
    }

    output
}

/// Escape characters that would change the meaning of a list item.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    #[test]
    fn test_to_markdown() {
        let outline = DocumentOutline {
            title: Some("User Manual".to_string()),
            outline: vec![
                OutlineEntry::new(HeadingLevel::H1, "Setup", 1),
                OutlineEntry::new(HeadingLevel::H2, "Install", 2),
                OutlineEntry::new(HeadingLevel::H3, "Linux", 2),
            ],
        };

        let md = to_markdown(&outline);
        assert_eq!(
            md,
            "# User Manual\n\n- Setup (p. 1)\n  - Install (p. 2)\n    - Linux (p. 2)\n"
        );
    }

    #[test]
    fn test_to_markdown_empty() {
        assert_eq!(to_markdown(&DocumentOutline::new()), "");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape("a_b *c*"), "a\\_b \\*c\\*");
    }
}
