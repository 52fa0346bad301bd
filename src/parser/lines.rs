//! Conversion of baseline groups into plausible text lines.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::{BoundingBox, Line};

use super::layout::TextLine;
use super::options::DEFAULT_MIN_LINE_CHARS;

/// Characters counted as symbols by the plausibility filter.
const SYMBOL_CHARS: &str = ".,()[]{}|+-*/:;$%@#&";

/// Lines made of more spans than this are usually tables or figure labels.
const MAX_SPANS: usize = 12;

/// Builds [`Line`] records from grouped spans and drops implausible ones.
pub struct LineBuilder {
    min_chars: usize,
    numbering_regex: Regex,
}

impl LineBuilder {
    /// Create a builder keeping lines of at least `min_chars` characters.
    pub fn new(min_chars: usize) -> Self {
        Self {
            min_chars,
            numbering_regex: Regex::new(r"^(\d+(\.\d+)*[.)\-]|\([a-zA-Z0-9]\)|•|-|\*)\s+")
                .expect("valid numbering pattern"),
        }
    }

    /// Build a line for `page`, or `None` when the text is not plausible.
    ///
    /// `page_height` flips PDF coordinates so `top` grows downwards.
    pub fn build(&self, text_line: &TextLine, page: u32, page_height: f32) -> Option<Line> {
        let text: String = text_line.text().nfkc().collect();
        let text = text.trim();
        if !self.is_complete_text_line(text, text_line.spans.len()) {
            return None;
        }

        let left = text_line.left();
        let top = page_height - text_line.y;
        let ascent = text_line.max_font_size();
        let bbox = BoundingBox::new(left, top - ascent, text_line.right(), top);

        let mut line = Line::new(
            text,
            text_line.dominant_size(),
            text_line.dominant_font(),
            text_line.is_bold(),
            page,
        )
        .with_position(left, top)
        .with_bbox(bbox);
        line.numbering = self.numbering(text);
        Some(line)
    }

    /// Leading list marker of `text`, without the following whitespace.
    pub fn numbering(&self, text: &str) -> Option<String> {
        self.numbering_regex
            .find(text)
            .map(|m| m.as_str().trim_end().to_string())
    }

    /// Check if `text` reads like prose or a heading rather than debris
    /// (page furniture, table cells, stray symbols).
    pub fn is_complete_text_line(&self, text: &str, span_count: usize) -> bool {
        let text = text.trim();
        if text.chars().count() < self.min_chars {
            return false;
        }

        let non_space = text.chars().filter(|&c| c != ' ').count();
        if non_space > 0 {
            let letters = text.chars().filter(|c| c.is_alphabetic()).count();
            if (letters as f32) / (non_space as f32) < 0.3 {
                return false;
            }
            let symbols = text.chars().filter(|&c| SYMBOL_CHARS.contains(c)).count();
            if (symbols as f32) / (non_space as f32) > 0.4 {
                return false;
            }
        }

        if span_count > MAX_SPANS {
            return false;
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() > 2 {
            let meaningful = words.iter().filter(|w| w.chars().count() > 1).count();
            if (meaningful as f32) / (words.len() as f32) < 0.3 {
                return false;
            }
        }

        true
    }
}

impl Default for LineBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LINE_CHARS)
    }
}
