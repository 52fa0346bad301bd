//! Heading detection and level assignment.
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`FontStatistics`] picks the body size (the most frequent font size).
//! 2. [`LineClassifier`] selects heading candidates.
//! 3. [`merge`] folds wrapped fragments into single headings.
//! 4. [`assign_levels`] turns the first heading into the title and assigns
//!    H1–H3 to the rest.
//!
//! Every stage is a pure function of its input; documents with no typographic
//! hierarchy simply produce an empty outline.

mod classifier;
mod levels;
mod merger;
mod options;
mod stats;

pub use classifier::{
    classify, ends_with_continuation, CandidateReason, HeadingCandidate, LineClassifier,
    CONTINUATION_ENDINGS,
};
pub use levels::assign_levels;
pub use merger::{merge, unmerged};
pub use options::{DetectOptions, DEFAULT_BODY_SIZE};
pub use stats::FontStatistics;

use crate::model::{DocumentOutline, Heading, Line};

/// Result of running heading detection over one line stream.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    /// Title and leveled outline
    pub outline: DocumentOutline,

    /// Merged headings, title first
    pub headings: Vec<Heading>,

    /// Body font size the classifier compared against
    pub reference_size: f32,

    /// Number of candidate lines before merging
    pub candidate_count: usize,
}

impl Detection {
    /// Check if no heading was found.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }
}

/// Heading detector for line streams.
pub struct HeadingDetector {
    options: DetectOptions,
    classifier: LineClassifier,
}

impl HeadingDetector {
    /// Create a detector with the given options.
    pub fn new(options: DetectOptions) -> Self {
        let classifier = LineClassifier::new(options.clone());
        Self {
            options,
            classifier,
        }
    }

    /// Get the detection options.
    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Body size of a line stream, or the configured fallback for an empty one.
    pub fn reference_size(&self, lines: &[Line]) -> f32 {
        FontStatistics::from_lines(lines).body_size_or(self.options.fallback_body_size)
    }

    /// Run the full pipeline over `lines`.
    pub fn detect(&self, lines: &[Line]) -> Detection {
        let reference_size = self.reference_size(lines);
        let candidates = self.classifier.classify(lines, reference_size);
        let headings = if self.options.merge_fragments {
            merge(&candidates)
        } else {
            unmerged(&candidates)
        };

        log::debug!(
            "{} lines, reference size {}, {} candidates, {} headings",
            lines.len(),
            reference_size,
            candidates.len(),
            headings.len()
        );

        let outline = assign_levels(&headings, lines);
        Detection {
            outline,
            candidate_count: candidates.len(),
            headings,
            reference_size,
        }
    }

    /// Run the pipeline and keep only the outline.
    pub fn outline(&self, lines: &[Line]) -> DocumentOutline {
        self.detect(lines).outline
    }
}

impl Default for HeadingDetector {
    fn default() -> Self {
        Self::new(DetectOptions::default())
    }
}

/// Detect the title and outline of a line stream with default options.
pub fn detect_outline(lines: &[Line]) -> DocumentOutline {
    HeadingDetector::default().outline(lines)
}
