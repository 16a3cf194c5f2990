//! Non-fatal conditions collected during a run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::source::SourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A year file or a whole source file is absent.
    MissingSource,
    /// A country string with no alias and no code.
    UnresolvedName,
    /// A non-numeric value in a numeric field, or a row that cannot be keyed.
    MalformedRow,
    /// A year table without the columns needed to interpret it.
    StructuralFailure,
    /// A second row for a (country, year) key inside one source.
    DuplicateKey,
}

impl IssueKind {
    pub const ALL: [IssueKind; 5] = [
        Self::MissingSource,
        Self::UnresolvedName,
        Self::MalformedRow,
        Self::StructuralFailure,
        Self::DuplicateKey,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingSource => "missing_source",
            Self::UnresolvedName => "unresolved_name",
            Self::MalformedRow => "malformed_row",
            Self::StructuralFailure => "structural_failure",
            Self::DuplicateKey => "duplicate_key",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineIssue {
    pub kind: IssueKind,
    pub source: SourceKind,
    pub year: Option<i32>,
    /// For unresolved names this is the name itself.
    pub detail: String,
}

impl PipelineIssue {
    pub fn new(
        kind: IssueKind,
        source: SourceKind,
        year: Option<i32>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source,
            year,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PipelineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "[{} {}] {}: {}", self.source, year, self.kind, self.detail),
            None => write!(f, "[{}] {}: {}", self.source, self.kind, self.detail),
        }
    }
}

/// Append-only log of every issue raised in a run, in the order raised.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueLog {
    issues: Vec<PipelineIssue>,
}

impl IssueLog {
    pub fn record(&mut self, issue: PipelineIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: IssueLog) {
        self.issues.extend(other.issues);
    }

    pub fn issues(&self) -> &[PipelineIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }

    /// Issue counts per (source, kind), for summaries.
    pub fn counts_by_source(&self) -> BTreeMap<(SourceKind, IssueKind), usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry((issue.source, issue.kind)).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct unresolved names per source.
    pub fn unresolved_names(&self) -> BTreeMap<SourceKind, BTreeSet<String>> {
        let mut names: BTreeMap<SourceKind, BTreeSet<String>> = BTreeMap::new();
        for issue in &self.issues {
            if issue.kind == IssueKind::UnresolvedName {
                names
                    .entry(issue.source)
                    .or_default()
                    .insert(issue.detail.clone());
            }
        }
        names
    }
}
