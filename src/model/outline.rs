//! Document outline: title plus leveled headings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::HeadingLevel;

/// One leveled heading in an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Nesting level
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// 1-indexed page number
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and outline detected for one document.
///
/// Serializes as `{"title": ..., "outline": [...]}`. A missing title is
/// written as an empty string and an empty string reads back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title (the first detected heading)
    #[serde(
        default,
        serialize_with = "serialize_title",
        deserialize_with = "deserialize_title"
    )]
    pub title: Option<String>,

    /// Headings after the title, in reading order
    #[serde(default)]
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create an empty outline (no title, no headings).
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if neither a title nor any heading was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.outline.is_empty()
    }

    /// Number of outline entries (the title is not counted).
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Title text, or an empty string when none was detected.
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Entries at a given level.
    pub fn entries_at(&self, level: HeadingLevel) -> impl Iterator<Item = &OutlineEntry> {
        self.outline.iter().filter(move |e| e.level == level)
    }
}

fn serialize_title<S: Serializer>(title: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(title.as_deref().unwrap_or(""))
}

fn deserialize_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let title: Option<String> = Option::deserialize(deserializer)?;
    Ok(title.filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_persists_as_empty_string() {
        let outline = DocumentOutline::new();
        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_empty_title_reads_back_as_none() {
        let outline: DocumentOutline =
            serde_json::from_str(r#"{"title": "", "outline": []}"#).unwrap();
        assert!(outline.title.is_none());
        assert!(outline.is_empty());

        let outline: DocumentOutline = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert!(outline.title.is_none());
    }

    #[test]
    fn test_entry_shape() {
        let outline = DocumentOutline {
            title: Some("Annual Report".to_string()),
            outline: vec![OutlineEntry::new(HeadingLevel::H2, "Scope", 3)],
        };
        let value = serde_json::to_value(&outline).unwrap();
        assert_eq!(value["title"], "Annual Report");
        assert_eq!(value["outline"][0]["level"], "H2");
        assert_eq!(value["outline"][0]["text"], "Scope");
        assert_eq!(value["outline"][0]["page"], 3);
        assert_eq!(outline.entries_at(HeadingLevel::H2).count(), 1);
    }
}
