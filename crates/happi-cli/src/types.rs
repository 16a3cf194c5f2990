use std::path::PathBuf;

use happi_core::MergeStats;
use happi_model::{IssueLog, MergedRecord, SourceKind};
use happi_report::{Manifest, ValidationSummary};

/// Per-source counts from the load stage.
#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub source: SourceKind,
    pub description: &'static str,
    pub tables: usize,
    pub rows_read: usize,
    pub records: usize,
    pub issues: usize,
}

/// Everything the pipeline produced before export.
#[derive(Debug)]
pub struct PipelineRun {
    pub records: Vec<MergedRecord>,
    pub sources: Vec<SourceSummary>,
    pub issues: IssueLog,
    pub stats: MergeStats,
    pub standards_fingerprint: Option<String>,
}

#[derive(Debug)]
pub struct RunResult {
    pub run: PipelineRun,
    pub validation: ValidationSummary,
    /// `None` for dry runs and `validate`.
    pub manifest: Option<Manifest>,
    pub output_dir: PathBuf,
}
