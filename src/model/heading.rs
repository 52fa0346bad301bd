//! Merged headings and nesting levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Line;

/// A logical heading, possibly assembled from several wrapped lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text; fragments are joined with a single space
    pub text: String,

    /// Font size of the first fragment
    pub font_size: f32,

    /// Font name of the first fragment
    pub font_name: String,

    /// Whether the first fragment is bold
    pub is_bold: bool,

    /// 1-indexed page number
    pub page: u32,

    /// Position of the first fragment in the line stream
    pub line_index: usize,

    /// Number of lines folded into this heading
    pub fragments: usize,
}

impl Heading {
    /// Start a heading from a single line at `line_index`.
    pub fn from_line(line: &Line, line_index: usize) -> Self {
        Self {
            text: line.text.clone(),
            font_size: line.font_size,
            font_name: line.font_name.clone(),
            is_bold: line.is_bold,
            page: line.page,
            line_index,
            fragments: 1,
        }
    }

    /// Whether `line` can continue this heading.
    pub fn accepts(&self, line: &Line) -> bool {
        self.font_name == line.font_name
            && self.font_size == line.font_size
            && self.is_bold == line.is_bold
            && self.page == line.page
    }

    /// Append the text of a wrapped continuation line.
    pub fn append(&mut self, text: &str) {
        let joined = format!("{} {}", self.text.trim_end(), text.trim_start());
        self.text = joined;
        self.fragments += 1;
    }
}

/// Outline nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    /// Top-level section
    H1,
    /// Subsection
    H2,
    /// Sub-subsection and anything deeper
    H3,
}

impl HeadingLevel {
    /// Deepest level an outline uses.
    pub const MAX_DEPTH: u8 = 3;

    /// Level for a 1-based depth; depths past [`Self::MAX_DEPTH`] collapse to H3.
    pub fn from_depth(depth: u8) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// 1-based depth of this level.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label used in persisted outlines ("H1", "H2", "H3").
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "H1" | "h1" | "1" => Ok(HeadingLevel::H1),
            "H2" | "h2" | "2" => Ok(HeadingLevel::H2),
            "H3" | "h3" | "3" => Ok(HeadingLevel::H3),
            other => Err(format!("invalid heading level: {}", other)),
        }
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HeadingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_joins_with_single_space() {
        let line = Line::new("Intro ", 18.0, "Arial-Bold", true, 1);
        let mut heading = Heading::from_line(&line, 4);
        heading.append("  duction");
        assert_eq!(heading.text, "Intro duction");
        assert_eq!(heading.fragments, 2);
        assert_eq!(heading.line_index, 4);
    }

    #[test]
    fn test_level_depth_clamps() {
        assert_eq!(HeadingLevel::from_depth(1), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_depth(2), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_depth(3), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_depth(7), HeadingLevel::H3);
        assert_eq!(HeadingLevel::H2.depth(), 2);
    }

    #[test]
    fn test_level_serde() {
        let json = serde_json::to_string(&HeadingLevel::H3).unwrap();
        assert_eq!(json, "\"H3\"");
        let level: HeadingLevel = serde_json::from_str("\"H2\"").unwrap();
        assert_eq!(level, HeadingLevel::H2);
        assert!(serde_json::from_str::<HeadingLevel>("\"H9\"").is_err());
    }
}
