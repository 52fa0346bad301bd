//! Directory batch processing tests.

mod common;

use std::fs;

use pdfoutline::batch::{process_directory_with_progress, BatchEvent};
use pdfoutline::{process_directory, BatchOptions, DocumentOutline, JsonFormat};

fn fixture_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("report.pdf"), common::report_pdf()).unwrap();
    fs::write(dir.path().join("notes.PDF"), common::plain_pdf()).unwrap();
    fs::write(dir.path().join("broken.pdf"), b"not a pdf at all").unwrap();
    fs::write(dir.path().join("readme.txt"), b"not an input").unwrap();
    dir
}

#[test]
fn test_batch_writes_outlines() {
    let dir = fixture_dir();
    let report = process_directory(dir.path(), &BatchOptions::new()).unwrap();

    let names: Vec<String> = report
        .documents
        .iter()
        .map(|d| d.file.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["broken.pdf", "notes.PDF", "report.pdf"]);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed().count(), 1);

    let written = fs::read_to_string(dir.path().join("outlines").join("report.json")).unwrap();
    let outline: DocumentOutline = serde_json::from_str(&written).unwrap();
    assert_eq!(outline.title.as_deref(), Some("Quarterly Review"));
    assert_eq!(outline.outline.len(), 3);

    let notes = fs::read_to_string(dir.path().join("outlines").join("notes.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&notes).unwrap();
    assert_eq!(value["title"], "");
    assert!(!dir.path().join("outlines").join("broken.json").exists());
}

#[test]
fn test_sequential_matches_parallel() {
    let dir = fixture_dir();
    let out_a = tempfile::tempdir().unwrap();
    let out_b = tempfile::tempdir().unwrap();

    let parallel = process_directory(
        dir.path(),
        &BatchOptions::new().with_output_dir(out_a.path()),
    )
    .unwrap();
    let sequential = process_directory(
        dir.path(),
        &BatchOptions::new()
            .sequential()
            .with_output_dir(out_b.path()),
    )
    .unwrap();

    let summary = |r: &pdfoutline::BatchReport| {
        r.documents
            .iter()
            .map(|d| (d.title.clone(), d.headings, d.is_ok()))
            .collect::<Vec<_>>()
    };
    assert_eq!(summary(&parallel), summary(&sequential));
    assert_eq!(
        fs::read_to_string(out_a.path().join("report.json")).unwrap(),
        fs::read_to_string(out_b.path().join("report.json")).unwrap()
    );
}

#[test]
fn test_batch_progress_events() {
    let dir = fixture_dir();
    let (tx, rx) = crossbeam_channel::unbounded();

    let report = process_directory_with_progress(
        dir.path(),
        &BatchOptions::new().with_format(JsonFormat::Compact),
        tx,
    )
    .unwrap();

    let events: Vec<BatchEvent> = rx.iter().collect();
    assert!(matches!(events.first(), Some(BatchEvent::Started(3))));
    let processed = events
        .iter()
        .filter(|e| matches!(e, BatchEvent::Processed(_)))
        .count();
    assert_eq!(processed, report.documents.len());

    let written = fs::read_to_string(dir.path().join("outlines").join("report.json")).unwrap();
    assert!(!written.contains('\n'));
}

#[test]
fn test_report_serializes_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let report = process_directory(dir.path(), &BatchOptions::new()).unwrap();
    assert!(report.documents.is_empty());

    let value = serde_json::to_value(&report).unwrap();
    assert!(value["processed_at"].is_string());
    assert_eq!(value["documents"], serde_json::json!([]));
}
