//! PDF line extraction using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::Line;

use super::layout::{group_spans_into_lines, LayoutAnalyzer};
use super::lines::LineBuilder;
use super::options::{ErrorMode, ExtractOptions, PageSelection};

/// US Letter height, used when a page has no readable MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Bound on the page tree walk; guards against cyclic `Parent` links.
const MAX_INHERIT_DEPTH: usize = 32;

/// PDF line extractor.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        Self::with_document(doc, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::with_document(doc, options)
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn with_document(doc: LopdfDocument, options: ExtractOptions) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc, options })
    }

    /// Get the extraction options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// PDF version from the file header (e.g., "1.7").
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    /// Extract the plausible text lines of all selected pages, page-major and
    /// top to bottom within each page.
    pub fn extract_lines(&self) -> Result<Vec<Line>> {
        let pages = self.doc.get_pages();
        let total = pages.len() as u32;
        self.check_selection(total)?;

        let builder = LineBuilder::new(self.options.min_line_chars);
        let analyzer = LayoutAnalyzer::new(&self.doc);
        let mut lines = Vec::new();

        for (&page_num, &page_id) in &pages {
            if !self.options.pages.includes(page_num) {
                continue;
            }

            match self.page_lines(&analyzer, &builder, page_num, page_id) {
                Ok(page_lines) => {
                    log::debug!("Page {}: {} lines", page_num, page_lines.len());
                    lines.extend(page_lines);
                }
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", page_num, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(lines)
    }

    /// Extract the plausible text lines of a single page.
    pub fn extract_page_lines(&self, page_num: u32) -> Result<Vec<Line>> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let builder = LineBuilder::new(self.options.min_line_chars);
        self.page_lines(&LayoutAnalyzer::new(&self.doc), &builder, page_num, page_id)
    }

    fn page_lines(
        &self,
        analyzer: &LayoutAnalyzer<'_>,
        builder: &LineBuilder,
        page_num: u32,
        page_id: ObjectId,
    ) -> Result<Vec<Line>> {
        let height = self.page_height(page_id);
        let spans = analyzer.page_spans(page_id).map_err(|e| match e {
            Error::PdfParse(msg) => Error::TextExtract(format!("Page {}: {}", page_num, msg)),
            other => other,
        })?;

        Ok(group_spans_into_lines(spans)
            .iter()
            .filter_map(|text_line| builder.build(text_line, page_num, height))
            .collect())
    }

    /// Explicitly listed pages must exist in strict mode.
    fn check_selection(&self, total: u32) -> Result<()> {
        let missing = match &self.options.pages {
            PageSelection::All => None,
            PageSelection::Range(range) => Some(*range.start()).filter(|&p| p > total),
            PageSelection::Pages(pages) => pages.iter().copied().find(|&p| p > total),
        };

        match missing {
            Some(page) if self.options.error_mode == ErrorMode::Strict => {
                Err(Error::PageOutOfRange(page, total))
            }
            Some(page) => {
                log::warn!("Page {} is beyond the last page ({})", page, total);
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Page height from the MediaBox, following inherited attributes.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        let mut dict = self.doc.get_dictionary(page_id).ok();

        for _ in 0..MAX_INHERIT_DEPTH {
            let Some(current) = dict else { break };
            if let Some(height) = media_box_height(current) {
                return height;
            }
            dict = current
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|id| self.doc.get_dictionary(id))
                .ok();
        }

        DEFAULT_PAGE_HEIGHT
    }
}

fn media_box_height(dict: &Dictionary) -> Option<f32> {
    let array = dict.get(b"MediaBox").ok()?.as_array().ok()?;
    if array.len() < 4 {
        return None;
    }
    let y0 = array[1].as_float().ok()?;
    let y1 = array[3].as_float().ok()?;
    Some((y1 - y0).abs())
}
