//! Pipeline stages: ingest, load, merge, export.

use std::time::Instant;

use anyhow::{Context, Result};
use happi_core::{
    LoadContext, SourceSets, SourceTables, default_registry, load_source, merge, read_sources,
};
use happi_ingest::DataLayout;
use happi_model::SourceKind;
use happi_report::{ExportViews, Manifest, data_dictionary, unresolved_names, write_outputs};
use happi_standards::ReferenceTables;
use tracing::{info, info_span};

use crate::config::RunConfig;
use crate::types::{PipelineRun, SourceSummary};

/// Loads the reference tables, reads and loads every source, and merges them.
pub fn run_pipeline(config: &RunConfig) -> Result<PipelineRun> {
    let tables = ReferenceTables::load(&config.standards_dir).with_context(|| {
        format!(
            "load reference tables from {}",
            config.standards_dir.display()
        )
    })?;
    let mut ctx = LoadContext::new(&tables, &config.options);

    let raw = info_span!("ingest", data_dir = %config.data_dir.display()).in_scope(
        || -> Result<SourceTables> {
            let start = Instant::now();
            let layout = DataLayout::new(&config.data_dir);
            let raw = read_sources(&layout, &mut ctx).context("read source files")?;
            info!(
                tables = raw.table_count(),
                duration_ms = start.elapsed().as_millis(),
                "ingest complete"
            );
            Ok(raw)
        },
    )?;

    let mut sets = SourceSets::default();
    let mut sources = Vec::with_capacity(SourceKind::ALL.len());
    for source in SourceKind::ALL {
        let Some(loader) = default_registry().get(source) else {
            continue;
        };
        let span = info_span!("load", source = %source);
        let _guard = span.enter();
        let start = Instant::now();
        let issues_before = ctx.issues().len();
        let load = load_source(loader, raw.tables(source), &mut ctx);
        info!(
            tables = load.tables_read,
            rows = load.rows_read,
            records = load.records.len(),
            duration_ms = start.elapsed().as_millis(),
            "source loaded"
        );
        sources.push(SourceSummary {
            source,
            description: loader.description(),
            tables: load.tables_read,
            rows_read: load.rows_read,
            records: load.records.len(),
            issues: ctx.issues().len() - issues_before,
        });
        match source {
            SourceKind::Happiness => sets.happiness = load.records,
            SourceKind::Hdi => sets.hdi = load.records,
            SourceKind::Population => sets.population = load.records,
        }
    }

    let output = info_span!("merge").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let output = merge(sets, &tables, &config.options)?;
        info!(
            records = output.records.len(),
            duration_ms = start.elapsed().as_millis(),
            "merge complete"
        );
        Ok(output)
    })?;

    Ok(PipelineRun {
        records: output.records,
        sources,
        issues: ctx.into_issues(),
        stats: output.stats,
        standards_fingerprint: tables.fingerprint().map(str::to_string),
    })
}

/// Writes every export view for `run` under the configured output directory.
pub fn export(run: &PipelineRun, config: &RunConfig) -> Result<Manifest> {
    let span = info_span!("export", output_dir = %config.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let views = ExportViews::build(&run.records);
    let manifest = write_outputs(
        &config.output_dir,
        &views,
        &data_dictionary(&config.options),
        &unresolved_names(&run.issues),
        config.options.decimals,
        run.standards_fingerprint.as_deref(),
    )?;
    info!(
        files = manifest.files.len(),
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    Ok(manifest)
}
