//! CLI argument definitions for happiscope.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use happi_cli::config::Overrides;
use happi_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "happiscope",
    version,
    about = "Merge yearly happiness, development and population tables into front-end data files",
    long_about = "Reads the World Happiness Report, Human Development Index and UN population\n\
                  tables, reconciles country names, merges them per (country, year) and writes\n\
                  the JSON/CSV files consumed by the HappiScope front end.\n\n\
                  Running without a subcommand is the same as `happiscope run`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./happiscope.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `--log-level` beats `-v/-q`; `RUST_LOG` is only consulted when neither is given.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            with_ansi: ansi,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and write every output file.
    Run(RunArgs),

    /// Run the pipeline without writing files and print the validation summary.
    Validate(SourceArgs),

    /// List the reference country code table.
    Countries(StandardsArgs),
}

#[derive(Args, Clone, Default)]
pub struct StandardsArgs {
    /// Directory holding the reference CSV tables.
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Root of the raw data (happiness_score_data/, hdi_data/, population_data/).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(flatten)]
    pub standards: StandardsArgs,

    /// First year to read.
    #[arg(long = "first-year", value_name = "YEAR")]
    pub first_year: Option<i32>,

    /// Last year to read.
    #[arg(long = "last-year", value_name = "YEAR")]
    pub last_year: Option<i32>,
}

#[derive(Args, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl SourceArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            output_dir: None,
            standards_dir: self.standards.standards_dir.clone(),
            first_year: self.first_year,
            last_year: self.last_year,
        }
    }
}

impl RunArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output_dir: self.output_dir.clone(),
            ..self.sources.overrides()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_runs_with_defaults() {
        let cli = Cli::try_parse_from(["happiscope"]).unwrap();
        assert!(cli.command.is_none());
        let config = cli.log_config();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
    }

    #[test]
    fn explicit_level_disables_env_filter() {
        let cli = Cli::try_parse_from(["happiscope", "--log-level", "debug", "--log-format", "json"])
            .unwrap();
        let config = cli.log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn run_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "happiscope",
            "run",
            "--data-dir",
            "raw",
            "--output-dir",
            "site/data",
            "--first-year",
            "2018",
        ])
        .unwrap();
        let Some(Command::Run(args)) = cli.command else {
            panic!("expected run");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.data_dir, Some(PathBuf::from("raw")));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("site/data")));
        assert_eq!(overrides.first_year, Some(2018));
        assert_eq!(overrides.last_year, None);
    }
}
