//! PDF line extraction.
//!
//! Pages are decoded into positioned spans, spans are grouped into lines by
//! baseline, and only plausible text lines are kept for heading detection.

mod layout;
mod lines;
mod options;
mod pdf_parser;

pub use layout::{group_spans_into_lines, round_size, LayoutAnalyzer, TextLine, TextSpan};
pub use lines::LineBuilder;
pub use options::{ErrorMode, ExtractOptions, PageSelection, DEFAULT_MIN_LINE_CHARS};
pub use pdf_parser::PdfParser;
