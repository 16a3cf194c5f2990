use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No happiness rows were loaded for any year; nothing downstream can be keyed.
    #[error("no happiness data found for {first}-{last}")]
    PrimarySourceMissing { first: i32, last: i32 },

    #[error("invalid year range {first}-{last} (supported: {min}-{max})")]
    InvalidYearRange {
        first: i32,
        last: i32,
        min: i32,
        max: i32,
    },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
