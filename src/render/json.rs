//! JSON rendering and persistence.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{DocumentOutline, Line};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    to_json_value(outline, format)
}

/// Convert a line stream to JSON.
pub fn lines_to_json(lines: &[Line], format: JsonFormat) -> Result<String> {
    to_json_value(lines, format)
}

/// Serialize any value with the given format.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write a value to `path` as JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    format: JsonFormat,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json_value(value, format)?)?;
    Ok(())
}

/// Append a record to the JSON array stored in `path`.
///
/// A missing, empty or unparsable file starts a new array; a file holding a
/// single non-array value becomes the first element. The file is rewritten
/// pretty-printed.
pub fn append_json_record<T: Serialize + ?Sized>(path: impl AsRef<Path>, record: &T) -> Result<()> {
    let path = path.as_ref();

    let mut records = match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(items)) => items,
            Ok(other) => vec![other],
            Err(e) => {
                if !content.trim().is_empty() {
                    log::warn!("Replacing unreadable JSON in {}: {}", path.display(), e);
                }
                Vec::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    records.push(serde_json::to_value(record)?);
    write_json(path, &records, JsonFormat::Pretty)
}

/// Read a line stream previously written with [`lines_to_json`].
///
/// Short field names (`size`, `font`, `bold`) are accepted as well.
pub fn read_lines_json(path: impl AsRef<Path>) -> Result<Vec<Line>> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> DocumentOutline {
        DocumentOutline {
            title: Some("Handbook".to_string()),
            outline: vec![OutlineEntry::new(HeadingLevel::H1, "Welcome", 1)],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Handbook\""));
        assert!(json.contains("\"level\": \"H1\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&DocumentOutline::new(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_append_json_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        append_json_record(&path, &sample()).unwrap();
        append_json_record(&path, &DocumentOutline::new()).unwrap();

        let stored: Vec<DocumentOutline> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], sample());
        assert!(stored[1].title.is_none());
    }

    #[test]
    fn test_append_wraps_single_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(&path, r#"{"title":"Old","outline":[]}"#).unwrap();

        append_json_record(&path, &sample()).unwrap();

        let stored: Vec<DocumentOutline> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].title.as_deref(), Some("Old"));
    }

    #[test]
    fn test_append_replaces_invalid_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(&path, "{ not json").unwrap();

        append_json_record(&path, &sample()).unwrap();

        let stored: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_lines_json_round_trip_with_short_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.json");
        fs::write(
            &path,
            r#"[{"text":"Intro","size":18.0,"font":"Arial-Bold","bold":true,"page":1}]"#,
        )
        .unwrap();

        let lines = read_lines_json(&path).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].font_name, "Arial-Bold");

        let json = lines_to_json(&lines, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"font_size\":18.0"));
    }
}
