use std::path::PathBuf;
use thiserror::Error;

/// Failures reading the raw source tree.
///
/// A missing data root is fatal to the run; every other variant is reported
/// against a single file and that file is skipped.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// No header row, or no columns at all.
    #[error("empty table: {path}")]
    EmptyCsv { path: PathBuf },

    /// The file starts with a UTF-16 byte-order mark.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/hdi_data/human-development-index.csv"),
        };
        assert_eq!(
            err.to_string(),
            "source file not found: /data/hdi_data/human-development-index.csv"
        );
        let err = IngestError::UnsupportedEncoding {
            path: PathBuf::from("2016_report.csv"),
            encoding: "UTF-16 BE",
        };
        assert_eq!(err.to_string(), "unsupported encoding UTF-16 BE in 2016_report.csv");
    }
}
