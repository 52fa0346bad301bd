//! Outline extraction over a directory of PDFs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::heading::DetectOptions;
use crate::parser::ExtractOptions;
use crate::render::{write_json, JsonFormat};
use crate::Outliner;

/// Name of the output directory created next to the inputs by default.
pub const DEFAULT_OUTPUT_DIR: &str = "outlines";

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Where outlines are written; `<input>/outlines` when unset
    pub output_dir: Option<PathBuf>,

    /// Process documents on the rayon thread pool
    pub parallel: bool,

    /// JSON layout of the written outlines
    pub format: JsonFormat,

    /// Line extraction options applied to every document
    pub extract: ExtractOptions,

    /// Heading detection options applied to every document
    pub detect: DetectOptions,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set line extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set heading detection options.
    pub fn with_detect_options(mut self, options: DetectOptions) -> Self {
        self.detect = options;
        self
    }

    /// Output directory for inputs found in `input_dir`.
    pub fn resolve_output_dir(&self, input_dir: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| input_dir.join(DEFAULT_OUTPUT_DIR))
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            parallel: true,
            format: JsonFormat::Pretty,
            extract: ExtractOptions::default(),
            detect: DetectOptions::default(),
        }
    }
}

/// Outcome for one document of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// Input PDF
    pub file: PathBuf,

    /// Detected title
    pub title: Option<String>,

    /// Number of outline entries
    pub headings: usize,

    /// Written outline file, when processing succeeded
    pub output: Option<PathBuf>,

    /// Failure message, when processing failed
    pub error: Option<String>,
}

impl BatchEntry {
    /// Check if the document was processed successfully.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// When the batch finished
    pub processed_at: DateTime<Utc>,

    /// Per-document outcomes, in input order
    pub documents: Vec<BatchEntry>,
}

impl BatchReport {
    /// Number of successfully processed documents.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_ok()).count()
    }

    /// Documents that failed.
    pub fn failed(&self) -> impl Iterator<Item = &BatchEntry> {
        self.documents.iter().filter(|d| !d.is_ok())
    }
}

/// Progress notifications sent while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Processing started for this many documents
    Started(usize),
    /// One document finished, successfully or not
    Processed(BatchEntry),
}

/// List the PDF files directly inside `dir`, sorted by name.
///
/// The `.pdf` extension is matched case-insensitively.
pub fn pdf_files_in(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract and write the outline of every PDF in `dir`.
pub fn process_directory(dir: impl AsRef<Path>, options: &BatchOptions) -> Result<BatchReport> {
    run(dir.as_ref(), options, None)
}

/// Like [`process_directory`], reporting progress on `events`.
///
/// A disconnected receiver does not stop the batch.
pub fn process_directory_with_progress(
    dir: impl AsRef<Path>,
    options: &BatchOptions,
    events: Sender<BatchEvent>,
) -> Result<BatchReport> {
    run(dir.as_ref(), options, Some(&events))
}

fn run(dir: &Path, options: &BatchOptions, events: Option<&Sender<BatchEvent>>) -> Result<BatchReport> {
    let files = pdf_files_in(dir)?;
    let out_dir = options.resolve_output_dir(dir);
    fs::create_dir_all(&out_dir)?;

    log::debug!("Processing {} PDFs into {}", files.len(), out_dir.display());
    notify(events, BatchEvent::Started(files.len()));

    let outliner = Outliner::new()
        .with_extract_options(options.extract.clone())
        .with_detect_options(options.detect.clone());

    let process = |file: &PathBuf| {
        let entry = process_file(&outliner, file, &out_dir, options.format);
        notify(events, BatchEvent::Processed(entry.clone()));
        entry
    };

    let documents: Vec<BatchEntry> = if options.parallel {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    Ok(BatchReport {
        processed_at: Utc::now(),
        documents,
    })
}

fn process_file(outliner: &Outliner, file: &Path, out_dir: &Path, format: JsonFormat) -> BatchEntry {
    let result = outline_to_file(outliner, file, out_dir, format);
    match result {
        Ok((title, headings, output)) => BatchEntry {
            file: file.to_path_buf(),
            title,
            headings,
            output: Some(output),
            error: None,
        },
        Err(e) => {
            log::warn!("Failed to process {}: {}", file.display(), e);
            BatchEntry {
                file: file.to_path_buf(),
                title: None,
                headings: 0,
                output: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn outline_to_file(
    outliner: &Outliner,
    file: &Path,
    out_dir: &Path,
    format: JsonFormat,
) -> Result<(Option<String>, usize, PathBuf)> {
    let outline = outliner.outline_file(file)?;
    let stem = file
        .file_stem()
        .ok_or_else(|| Error::Other(format!("No file name in {}", file.display())))?;
    let output = out_dir.join(format!("{}.json", stem.to_string_lossy()));

    write_json(&output, &outline, format)?;
    Ok((outline.title, outline.outline.len(), output))
}

fn notify(events: Option<&Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}
