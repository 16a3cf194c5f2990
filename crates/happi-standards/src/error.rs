use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid {kind} code '{code}' for {name}")]
    InvalidCode {
        name: String,
        code: String,
        kind: String,
    },

    #[error("duplicate entry '{key}' in {table}")]
    DuplicateEntry { table: &'static str, key: String },

    #[error("alias '{variant}' maps to '{canonical}', which is itself an alias")]
    AliasChain { variant: String, canonical: String },

    #[error("header '{header}' for {source_name} maps to both {first} and {second}")]
    ConflictingHeader {
        source_name: String,
        header: String,
        first: String,
        second: String,
    },

    #[error("invalid value '{value}' in {table}: {message}")]
    InvalidValue {
        table: &'static str,
        value: String,
        message: String,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
