use happi_model::{IssueKind, IssueLog, PipelineIssue, PipelineOptions, SourceKind};
use happi_standards::ReferenceTables;
use tracing::warn;

/// Shared, read-only inputs for a run plus the issue log every stage appends to.
#[derive(Debug)]
pub struct LoadContext<'a> {
    pub tables: &'a ReferenceTables,
    pub options: &'a PipelineOptions,
    issues: IssueLog,
}

impl<'a> LoadContext<'a> {
    pub fn new(tables: &'a ReferenceTables, options: &'a PipelineOptions) -> Self {
        Self {
            tables,
            options,
            issues: IssueLog::default(),
        }
    }

    /// Logs and records a non-fatal issue.
    pub fn issue(
        &mut self,
        kind: IssueKind,
        source: SourceKind,
        year: Option<i32>,
        detail: impl Into<String>,
    ) {
        let issue = PipelineIssue::new(kind, source, year, detail);
        warn!(
            kind = %issue.kind,
            source = %issue.source,
            year = ?issue.year,
            detail = %issue.detail,
            "pipeline issue"
        );
        self.issues.record(issue);
    }

    pub fn issues(&self) -> &IssueLog {
        &self.issues
    }

    pub fn into_issues(self) -> IssueLog {
        self.issues
    }
}
