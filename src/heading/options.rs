//! Heading detection options.

/// Body size assumed when a document has no lines at all.
pub const DEFAULT_BODY_SIZE: f32 = 12.0;

/// Options for heading detection.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectOptions {
    /// Reference size used when the line stream is empty
    pub fallback_body_size: f32,

    /// Treat lines larger than the body size as headings
    pub detect_oversized: bool,

    /// Treat short bold labels as headings
    pub detect_bold_labels: bool,

    /// Treat numbered lines ("1.", "2.3)") as headings
    pub detect_numbering: bool,

    /// Merge adjacent candidates that share font, size, weight and page
    pub merge_fragments: bool,
}

impl DetectOptions {
    /// Create new detection options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback body size.
    pub fn with_fallback_body_size(mut self, size: f32) -> Self {
        self.fallback_body_size = size;
        self
    }

    /// Enable or disable the oversized-font rule.
    pub fn with_oversized(mut self, enabled: bool) -> Self {
        self.detect_oversized = enabled;
        self
    }

    /// Enable or disable the bold-label rule.
    pub fn with_bold_labels(mut self, enabled: bool) -> Self {
        self.detect_bold_labels = enabled;
        self
    }

    /// Enable or disable the numbering rule.
    pub fn with_numbering(mut self, enabled: bool) -> Self {
        self.detect_numbering = enabled;
        self
    }

    /// Enable or disable fragment merging.
    pub fn with_merge(mut self, enabled: bool) -> Self {
        self.merge_fragments = enabled;
        self
    }

    /// Keep every candidate line as its own heading.
    pub fn unmerged(mut self) -> Self {
        self.merge_fragments = false;
        self
    }
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            fallback_body_size: DEFAULT_BODY_SIZE,
            detect_oversized: true,
            detect_bold_labels: true,
            detect_numbering: true,
            merge_fragments: true,
        }
    }
}
