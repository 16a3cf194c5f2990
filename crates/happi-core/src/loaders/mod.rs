//! Per-source loaders.
//!
//! Each loader turns raw tables of one source into canonical records:
//! headers are harmonized, names normalized and codes attached, and the
//! source's own row policy applied. [`load_source`] drives a loader over
//! every table of its source and enforces one row per (country, year).

mod happiness;
mod hdi;
mod loader_trait;
mod population;

use std::collections::HashSet;

use happi_ingest::NumericCell;
use happi_map::{NameNormalizer, ResolvedName};
use happi_model::{CanonicalField, CanonicalRecord, IssueKind, Metric, SourceKind};
use polars::prelude::DataFrame;
use tracing::{debug, debug_span};

use crate::context::LoadContext;
use crate::frame::CanonicalRows;

pub use happiness::HappinessLoader;
pub use hdi::HdiLoader;
pub use loader_trait::{LoaderRegistry, SourceLoader, default_registry};
pub use population::PopulationLoader;

/// One raw table as read from disk.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Year the file covers; `None` for long tables carrying a year column.
    pub year: Option<i32>,
    pub frame: DataFrame,
    /// Where the table came from, for diagnostics.
    pub origin: String,
}

impl RawTable {
    pub fn yearly(year: i32, frame: DataFrame, origin: impl Into<String>) -> Self {
        Self {
            year: Some(year),
            frame,
            origin: origin.into(),
        }
    }

    pub fn long(frame: DataFrame, origin: impl Into<String>) -> Self {
        Self {
            year: None,
            frame,
            origin: origin.into(),
        }
    }
}

/// Canonical record set for one source.
#[derive(Debug, Clone)]
pub struct SourceLoad {
    pub source: SourceKind,
    pub records: Vec<CanonicalRecord>,
    pub tables_read: usize,
    pub rows_read: usize,
}

/// Runs `loader` over all of its tables and concatenates the results.
pub fn load_source(
    loader: &dyn SourceLoader,
    tables: &[RawTable],
    ctx: &mut LoadContext<'_>,
) -> SourceLoad {
    let source = loader.source();
    let mut records = Vec::new();
    let mut rows_read = 0;
    for table in tables {
        let span = debug_span!("load_table", source = %source, year = ?table.year);
        let _guard = span.enter();
        let loaded = loader.load_table(table, ctx);
        rows_read += table.frame.height();
        debug!(
            origin = %table.origin,
            rows = table.frame.height(),
            records = loaded.len(),
            "table loaded"
        );
        records.extend(loaded);
    }

    if loader.long_format() && !tables.is_empty() {
        let years: HashSet<i32> = records.iter().map(|record| record.year).collect();
        for year in ctx.options.years() {
            if !years.contains(&year) {
                ctx.issue(
                    IssueKind::MissingSource,
                    source,
                    Some(year),
                    "no rows for year",
                );
            }
        }
    }

    SourceLoad {
        source,
        records: dedupe_keys(records, source, ctx),
        tables_read: tables.len(),
        rows_read,
    }
}

/// Keeps the first row per (country, year).
///
/// Loaders that compute per-year values call this before computing them;
/// [`load_source`] applies it again across tables.
fn dedupe_keys(
    records: Vec<CanonicalRecord>,
    source: SourceKind,
    ctx: &mut LoadContext<'_>,
) -> Vec<CanonicalRecord> {
    let mut seen: HashSet<(String, i32)> = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert((record.country.clone(), record.year)) {
            kept.push(record);
        } else {
            ctx.issue(
                IssueKind::DuplicateKey,
                source,
                Some(record.year),
                format!("{} appears more than once; first row kept", record.country),
            );
        }
    }
    kept
}

/// Country cell of `row`; a blank cell cannot be keyed and is reported.
fn country_text(
    rows: &CanonicalRows<'_>,
    row: usize,
    source: SourceKind,
    year: Option<i32>,
    ctx: &mut LoadContext<'_>,
) -> Option<String> {
    let text = rows.text(CanonicalField::Country, row);
    if text.is_none() {
        ctx.issue(
            IssueKind::MalformedRow,
            source,
            year,
            format!("row {}: empty country", row + 1),
        );
    }
    text
}

/// Normalizes a raw name and reports it when no code exists.
fn resolve_name(
    normalizer: &NameNormalizer<'_>,
    raw: &str,
    source: SourceKind,
    year: i32,
    ctx: &mut LoadContext<'_>,
) -> ResolvedName {
    let resolved = normalizer.resolve(raw);
    if resolved.code.is_none() {
        ctx.issue(
            IssueKind::UnresolvedName,
            source,
            Some(year),
            resolved.canonical.clone(),
        );
    }
    resolved
}

/// Numeric cell of `row`; malformed or out-of-domain values become absent and are reported.
fn read_metric(
    rows: &CanonicalRows<'_>,
    metric: Metric,
    row: usize,
    record: &CanonicalRecord,
    source: SourceKind,
    ctx: &mut LoadContext<'_>,
) -> Option<f64> {
    match rows.number(metric, row) {
        NumericCell::Absent => None,
        NumericCell::Value(value) if metric.is_non_negative() && value < 0.0 => {
            ctx.issue(
                IssueKind::MalformedRow,
                source,
                Some(record.year),
                format!("{}: negative {metric} {value}", record.country),
            );
            None
        }
        NumericCell::Value(value) => Some(value),
        NumericCell::Invalid(raw) => {
            ctx.issue(
                IssueKind::MalformedRow,
                source,
                Some(record.year),
                format!("{}: non-numeric {metric} '{raw}'", record.country),
            );
            None
        }
    }
}

/// Fills every metric column present in `rows` into `record`.
fn read_metrics(
    rows: &CanonicalRows<'_>,
    metrics: &[Metric],
    row: usize,
    record: &mut CanonicalRecord,
    source: SourceKind,
    ctx: &mut LoadContext<'_>,
) {
    for &metric in metrics {
        let value = read_metric(rows, metric, row, record, source, ctx);
        *metric.slot_mut(record) = value;
    }
}

/// Reports a table that cannot be interpreted; the caller skips it.
fn structural_failure(
    table: &RawTable,
    source: SourceKind,
    ctx: &mut LoadContext<'_>,
    reason: &str,
) {
    ctx.issue(
        IssueKind::StructuralFailure,
        source,
        table.year,
        format!("{reason} in {}", table.origin),
    );
}
