//! Reads every source file for the configured years into raw tables.

use std::path::Path;

use happi_ingest::{DataLayout, discover_files, read_csv_table};
use happi_model::{IssueKind, SourceKind};
use tracing::{debug, info};

use crate::context::LoadContext;
use crate::loaders::RawTable;

/// Raw tables per source, in year order.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub happiness: Vec<RawTable>,
    pub hdi: Vec<RawTable>,
    pub population: Vec<RawTable>,
}

impl SourceTables {
    pub fn tables(&self, source: SourceKind) -> &[RawTable] {
        match source {
            SourceKind::Happiness => &self.happiness,
            SourceKind::Hdi => &self.hdi,
            SourceKind::Population => &self.population,
        }
    }

    pub fn table_count(&self) -> usize {
        self.happiness.len() + self.hdi.len() + self.population.len()
    }
}

/// Reads the source files below `layout`.
///
/// Missing files are MissingSource issues and unreadable files are
/// StructuralFailure issues; only a missing data root is an error.
pub fn read_sources(
    layout: &DataLayout,
    ctx: &mut LoadContext<'_>,
) -> happi_ingest::Result<SourceTables> {
    let found = discover_files(layout, ctx.options.years())?;
    let mut tables = SourceTables::default();

    for year in ctx.options.years() {
        match found.happiness.get(&year) {
            Some(path) => {
                if let Some(table) = read_table(path, SourceKind::Happiness, Some(year), ctx) {
                    tables.happiness.push(table);
                }
            }
            None => ctx.issue(
                IssueKind::MissingSource,
                SourceKind::Happiness,
                Some(year),
                format!("file not found: {}", layout.happiness_file(year).display()),
            ),
        }
        match found.population.get(&year) {
            Some(path) => {
                if let Some(table) = read_table(path, SourceKind::Population, Some(year), ctx) {
                    tables.population.push(table);
                }
            }
            None => ctx.issue(
                IssueKind::MissingSource,
                SourceKind::Population,
                Some(year),
                format!("file not found: {}", layout.population_file(year).display()),
            ),
        }
    }

    match &found.hdi {
        Some(path) => {
            if let Some(table) = read_table(path, SourceKind::Hdi, None, ctx) {
                tables.hdi.push(table);
            }
        }
        None => ctx.issue(
            IssueKind::MissingSource,
            SourceKind::Hdi,
            None,
            format!("file not found: {}", layout.hdi_file().display()),
        ),
    }

    info!(
        root = %layout.root().display(),
        happiness = tables.happiness.len(),
        hdi = tables.hdi.len(),
        population = tables.population.len(),
        "source files read"
    );
    Ok(tables)
}

fn read_table(
    path: &Path,
    source: SourceKind,
    year: Option<i32>,
    ctx: &mut LoadContext<'_>,
) -> Option<RawTable> {
    match read_csv_table(path) {
        Ok(frame) => {
            debug!(
                path = %path.display(),
                rows = frame.height(),
                columns = frame.width(),
                "csv read"
            );
            let origin = path.display().to_string();
            Some(match year {
                Some(year) => RawTable::yearly(year, frame, origin),
                None => RawTable::long(frame, origin),
            })
        }
        Err(err) => {
            ctx.issue(IssueKind::StructuralFailure, source, year, err.to_string());
            None
        }
    }
}
