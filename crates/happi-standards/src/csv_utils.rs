//! Shared CSV utilities for loading standards files.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

pub type Row = BTreeMap<String, String>;

/// Parse CSV bytes into a vector of row maps keyed by header.
///
/// Handles BOM characters and trims whitespace from headers and values.
pub fn parse_csv_rows(path: &Path, bytes: &[u8]) -> Result<Vec<Row>> {
    let csv_error = |err: csv::Error| StandardsError::Csv {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers.get(idx).cloned().unwrap_or_default();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Get a required, non-empty field value.
pub fn require_field<'a>(row: &'a Row, key: &str, path: &Path) -> Result<&'a str> {
    match row.get(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(StandardsError::MissingColumn {
            path: path.to_path_buf(),
            column: key.to_string(),
        }),
    }
}

/// Get an optional field value from a row (None if empty or missing).
pub fn get_optional<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
