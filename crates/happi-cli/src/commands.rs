use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use happi_cli::config::{FileConfig, RunConfig};
use happi_cli::pipeline::{export, run_pipeline};
use happi_cli::types::RunResult;
use happi_report::validation_summary;
use happi_standards::{ReferenceTables, standards_root};
use tracing::info_span;

use crate::cli::{RunArgs, SourceArgs, StandardsArgs};
use crate::summary::apply_table_style;

pub fn run_countries(args: &StandardsArgs, config_path: Option<&Path>) -> Result<()> {
    let file = FileConfig::load(config_path)?;
    let root = args
        .standards_dir
        .clone()
        .or(file.standards_dir)
        .unwrap_or_else(standards_root);
    let tables = ReferenceTables::load(&root)
        .with_context(|| format!("load reference tables from {}", root.display()))?;
    let mut entries: Vec<_> = tables.code_entries().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    let mut table = Table::new();
    table.set_header(vec!["Name", "Code", "Kind"]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![
            entry.name.clone(),
            entry.code.clone(),
            entry.kind.as_str().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run(args: &RunArgs, config_path: Option<&Path>) -> Result<RunResult> {
    let config = RunConfig::resolve(FileConfig::load(config_path)?, args.overrides())?;
    let span = info_span!(
        "run",
        first_year = config.options.first_year,
        last_year = config.options.last_year,
        dry_run = args.dry_run
    );
    let _guard = span.enter();
    let run = run_pipeline(&config)?;
    let manifest = if args.dry_run {
        None
    } else {
        Some(export(&run, &config)?)
    };
    Ok(RunResult {
        validation: validation_summary(&run.records),
        run,
        manifest,
        output_dir: config.output_dir,
    })
}

pub fn run_validate(args: &SourceArgs, config_path: Option<&Path>) -> Result<RunResult> {
    run(
        &RunArgs {
            sources: args.clone(),
            output_dir: None,
            dry_run: true,
        },
        config_path,
    )
}
