//! Heading candidate classification.

use regex::Regex;

use crate::model::Line;

use super::DetectOptions;

/// Trailing characters that mark a line as structurally incomplete
/// ("Introduction:", "Step 1 -", a dangling bullet).
pub const CONTINUATION_ENDINGS: [char; 10] = [
    ':', '-', '\u{2013}', '\u{2014}', '\u{2212}', '\u{2015}', '\u{2022}', '\u{25AA}', '\u{25CF}',
    '\u{25A0}',
];

/// Punctuation allowed inside a bold label.
const LABEL_PUNCTUATION: &str = ",.:-()[]{}'\"";

/// A line selected as a heading candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingCandidate<'a> {
    /// Position of the line in the line stream
    pub index: usize,

    /// The candidate line
    pub line: &'a Line,
}

/// Which rule made a line a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateReason {
    /// Font larger than the body size
    Oversized,
    /// Bold text made of letters and light punctuation
    BoldLabel,
    /// Numbered prefix such as "2.3)"
    Numbered,
}

/// Scores lines against the heading heuristics.
pub struct LineClassifier {
    options: DetectOptions,
    numbering_regex: Regex,
}

impl LineClassifier {
    /// Create a classifier with the given options.
    pub fn new(options: DetectOptions) -> Self {
        Self {
            options,
            numbering_regex: Regex::new(r"^\d+(\.\d+)*[.)\-\s]").expect("valid numbering pattern"),
        }
    }

    /// Select heading candidates, preserving stream order.
    pub fn classify<'a>(&self, lines: &'a [Line], reference_size: f32) -> Vec<HeadingCandidate<'a>> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.reason(line, reference_size).is_some())
            .map(|(index, line)| HeadingCandidate { index, line })
            .collect()
    }

    /// The first rule that accepts `line`, or `None` for body text.
    pub fn reason(&self, line: &Line, reference_size: f32) -> Option<CandidateReason> {
        let text = line.trimmed();
        if ends_with_continuation(text) {
            return None;
        }

        if self.options.detect_oversized && line.font_size > reference_size {
            Some(CandidateReason::Oversized)
        } else if self.options.detect_bold_labels && line.is_bold && is_label_text(text) {
            Some(CandidateReason::BoldLabel)
        } else if self.options.detect_numbering && self.numbering_regex.is_match(text) {
            Some(CandidateReason::Numbered)
        } else {
            None
        }
    }

    /// Check if `line` is a heading candidate.
    pub fn is_candidate(&self, line: &Line, reference_size: f32) -> bool {
        self.reason(line, reference_size).is_some()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(DetectOptions::default())
    }
}

/// Select heading candidates with the default rules.
pub fn classify(lines: &[Line], reference_size: f32) -> Vec<HeadingCandidate<'_>> {
    LineClassifier::default().classify(lines, reference_size)
}

/// Check if trimmed text ends with a continuation mark.
pub fn ends_with_continuation(text: &str) -> bool {
    text.ends_with(CONTINUATION_ENDINGS)
}

fn is_label_text(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || LABEL_PUNCTUATION.contains(c))
}
