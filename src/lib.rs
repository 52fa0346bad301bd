//! # pdfoutline
//!
//! Title and heading outline detection for PDF documents.
//!
//! Text lines are extracted from each page together with their font size,
//! font name and weight. Lines that stand out typographically become heading
//! candidates, wrapped fragments are merged, and every heading after the
//! title is assigned a level from H1 to H3.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{outline_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = outline_file("report.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line extraction**: positioned text lines with dominant font metadata
//! - **Heading detection**: size, weight and numbering heuristics
//! - **Outline levels**: stack-based nesting that tolerates inconsistent sizes
//! - **Sections**: slice the line stream into the text of each heading
//! - **Batch processing**: whole directories on the Rayon thread pool

pub mod batch;
pub mod detect;
pub mod error;
pub mod heading;
pub mod model;
pub mod parser;
pub mod render;
pub mod section;

// Re-export commonly used types
pub use batch::{process_directory, BatchOptions, BatchReport};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, InputKind, PdfFormat};
pub use error::{Error, Result};
pub use heading::{detect_outline, DetectOptions, Detection, HeadingDetector};
pub use model::{BoundingBox, DocumentOutline, Heading, HeadingLevel, Line, OutlineEntry};
pub use parser::{ErrorMode, ExtractOptions, PageSelection, PdfParser};
pub use render::JsonFormat;
pub use section::{sections, Section};

use std::path::Path;

/// Extract the plausible text lines of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_lines;
///
/// let lines = extract_lines("report.pdf").unwrap();
/// println!("{} lines", lines.len());
/// ```
pub fn extract_lines<P: AsRef<Path>>(path: P) -> Result<Vec<Line>> {
    PdfParser::open(path)?.extract_lines()
}

/// Detect the title and outline of a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_file;
///
/// let outline = outline_file("report.pdf").unwrap();
/// if let Some(title) = &outline.title {
///     println!("Title: {}", title);
/// }
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    Outliner::new().outline_file(path)
}

/// Detect the title and outline of a PDF held in memory.
pub fn outline_bytes(data: &[u8]) -> Result<DocumentOutline> {
    Outliner::new().outline_bytes(data)
}

/// Detect the title and outline of an already extracted line stream.
pub fn outline_lines(lines: &[Line]) -> DocumentOutline {
    detect_outline(lines)
}

/// Builder combining line extraction and heading detection.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{Outliner, PageSelection};
///
/// let outline = Outliner::new()
///     .with_pages(PageSelection::parse("1-20")?)
///     .lenient()
///     .unmerged()
///     .outline_file("report.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    extract_options: ExtractOptions,
    detect_options: DetectOptions,
}

impl Outliner {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set line extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set heading detection options.
    pub fn with_detect_options(mut self, options: DetectOptions) -> Self {
        self.detect_options = options;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Keep wrapped heading fragments as separate headings.
    pub fn unmerged(mut self) -> Self {
        self.detect_options = self.detect_options.unmerged();
        self
    }

    /// Get the extraction options.
    pub fn extract_options(&self) -> &ExtractOptions {
        &self.extract_options
    }

    /// Get the detection options.
    pub fn detect_options(&self) -> &DetectOptions {
        &self.detect_options
    }

    /// Extract the lines of a PDF file.
    pub fn extract_lines<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Line>> {
        PdfParser::open_with_options(path, self.extract_options.clone())?.extract_lines()
    }

    /// Extract the lines of a PDF held in memory.
    pub fn extract_lines_from_bytes(&self, data: &[u8]) -> Result<Vec<Line>> {
        PdfParser::from_bytes_with_options(data, self.extract_options.clone())?.extract_lines()
    }

    /// Load a line stream from a PDF or from a JSON line dump.
    pub fn load_lines<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Line>> {
        let path = path.as_ref();
        match detect::detect_input_kind(path)? {
            InputKind::Pdf => self.extract_lines(path),
            InputKind::LineJson => render::read_lines_json(path),
        }
    }

    /// Run heading detection over a line stream.
    pub fn detect(&self, lines: &[Line]) -> Detection {
        HeadingDetector::new(self.detect_options.clone()).detect(lines)
    }

    /// Detect the outline of a PDF file.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let lines = self.extract_lines(path)?;
        Ok(self.detect(&lines).outline)
    }

    /// Detect the outline of a PDF held in memory.
    pub fn outline_bytes(&self, data: &[u8]) -> Result<DocumentOutline> {
        let lines = self.extract_lines_from_bytes(data)?;
        Ok(self.detect(&lines).outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .with_pages(PageSelection::Range(1..=3))
            .lenient()
            .unmerged();

        assert_eq!(outliner.extract_options().error_mode, ErrorMode::Lenient);
        assert!(outliner.extract_options().pages.includes(3));
        assert!(!outliner.extract_options().pages.includes(4));
        assert!(!outliner.detect_options().merge_fragments);
    }

    #[test]
    fn test_outline_lines() {
        let lines = vec![
            Line::new("Travel Policy", 20.0, "Arial-Bold", true, 1),
            Line::new("Employees may book economy fares.", 10.0, "Arial", false, 1),
            Line::new("Approvals", 14.0, "Arial-Bold", true, 1),
            Line::new("Managers approve every trip.", 10.0, "Arial", false, 1),
        ];
        let outline = outline_lines(&lines);
        assert_eq!(outline.title.as_deref(), Some("Travel Policy"));
        assert_eq!(outline.outline.len(), 1);
        assert_eq!(outline.outline[0].level, HeadingLevel::H1);
    }

    #[test]
    fn test_load_lines_from_json_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.json");
        std::fs::write(
            &path,
            r#"[{"text":"Scope","size":16,"font":"Arial-Bold","bold":true,"page":2}]"#,
        )
        .unwrap();

        let lines = Outliner::new().load_lines(&path).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].page, 2);
        assert_eq!(lines[0].font_size, 16.0);
    }

    #[test]
    fn test_outline_bytes_rejects_non_pdf() {
        assert!(outline_bytes(b"plain text").is_err());
    }
}
