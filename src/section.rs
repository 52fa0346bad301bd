//! Slicing a line stream into the sections of its outline.

use serde::Serialize;

use crate::heading::Detection;
use crate::model::{HeadingLevel, Line};

/// The text governed by one outline heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Level of the heading that opens the section
    pub level: HeadingLevel,

    /// Heading text
    pub heading: String,

    /// Page of the heading
    pub page: u32,

    /// Index of the heading line in the stream
    pub start_line: usize,

    /// Index one past the last line of the section
    pub end_line: usize,

    /// Section lines, heading included, joined by single spaces
    pub text: String,
}

impl Section {
    /// Number of whitespace-separated words in the section.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of lines in the section.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line
    }
}

/// Slice `lines` into one section per outline entry of `detection`.
///
/// A section runs from its heading line up to the next heading at the same or
/// a shallower level, so an H1 section contains its H2 and H3 subsections.
/// The title is not a section.
pub fn sections(lines: &[Line], detection: &Detection) -> Vec<Section> {
    // headings[0] is the title; the rest pair up with outline entries
    let entries: Vec<_> = detection
        .headings
        .iter()
        .skip(1)
        .zip(&detection.outline.outline)
        .collect();

    entries
        .iter()
        .enumerate()
        .map(|(i, (heading, entry))| {
            let start = heading.line_index.min(lines.len());
            let end = entries[i + 1..]
                .iter()
                .find(|(_, next)| next.level <= entry.level)
                .map(|(next, _)| next.line_index)
                .unwrap_or(lines.len())
                .clamp(start, lines.len());

            let text = lines[start..end]
                .iter()
                .map(Line::trimmed)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");

            Section {
                level: entry.level,
                heading: entry.text.clone(),
                page: entry.page,
                start_line: start,
                end_line: end,
                text,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::HeadingDetector;

    fn body(text: &str) -> Line {
        Line::new(text, 10.0, "Times-Roman", false, 1)
    }

    fn heading(text: &str, size: f32) -> Line {
        Line::new(text, size, "Times-Bold", true, 1)
    }

    fn sample() -> Vec<Line> {
        vec![
            heading("Field Guide", 24.0),
            body("An introduction for new staff."),
            heading("Safety", 18.0),
            body("Wear protective gear."),
            heading("Equipment", 14.0),
            body("Check tools daily."),
            heading("Schedule", 18.0),
            body("Shifts start at eight."),
        ]
    }

    #[test]
    fn test_sections_follow_levels() {
        let lines = sample();
        let detection = HeadingDetector::default().detect(&lines);
        let sections = sections(&lines, &detection);

        assert_eq!(sections.len(), 3);

        assert_eq!(sections[0].heading, "Safety");
        assert_eq!(sections[0].level, HeadingLevel::H1);
        assert_eq!((sections[0].start_line, sections[0].end_line), (2, 6));
        assert_eq!(
            sections[0].text,
            "Safety Wear protective gear. Equipment Check tools daily."
        );

        assert_eq!(sections[1].level, HeadingLevel::H2);
        assert_eq!((sections[1].start_line, sections[1].end_line), (4, 6));

        assert_eq!((sections[2].start_line, sections[2].end_line), (6, 8));
        assert_eq!(sections[2].word_count(), 5);
        assert_eq!(sections[2].line_count(), 2);
    }

    #[test]
    fn test_no_sections_without_outline() {
        let lines = vec![body("Just text."), body("More text.")];
        let detection = HeadingDetector::default().detect(&lines);
        assert!(sections(&lines, &detection).is_empty());
    }
}
