//! CSV file reading into string-typed polars frames.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Rejects files that start with a UTF-16 byte-order mark.
///
/// A UTF-8 BOM is accepted; the header normalizer strips it.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Reads a CSV file with a single header row.
///
/// Every column is read as a string so that numeric coercion happens per cell:
/// a stray `n/a` in a numeric column becomes one malformed cell instead of a
/// failed file.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| {
            if matches!(e, PolarsError::NoData(_)) {
                IngestError::EmptyCsv {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::CsvParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            }
        })?;

    if df.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "csv table read"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::polars_utils::any_to_string;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn reads_all_columns_as_strings() {
        let file = create_temp_csv(b"Country,Happiness Score\nFinland,7.8\nChad,n/a\n");
        let df = read_csv_table(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        let scores = df.column("Happiness Score").unwrap();
        assert_eq!(scores.dtype(), &DataType::String);
        assert_eq!(any_to_string(scores.get(1).unwrap()), "n/a");
    }

    #[test]
    fn rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'C', 0x00]);
        let err = read_csv_table(file.path()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_csv_table(Path::new("/nonexistent/2015_report.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
