//! Run configuration: CLI flags over `happiscope.toml` over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use happi_model::{Metric, PipelineOptions};
use happi_standards::standards_root;
use serde::Deserialize;
use tracing::debug;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "happiscope.toml";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Contents of `happiscope.toml`; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub standards_dir: Option<PathBuf>,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub decimals: Option<u32>,
    pub gap_fill_fields: Option<Vec<Metric>>,
}

impl FileConfig {
    /// Loads `path`, or the default file when present. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.is_file() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub standards_dir: Option<PathBuf>,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub standards_dir: PathBuf,
    pub options: PipelineOptions,
}

impl RunConfig {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let defaults = PipelineOptions::default();
        let options = PipelineOptions {
            first_year: overrides
                .first_year
                .or(file.first_year)
                .unwrap_or(defaults.first_year),
            last_year: overrides
                .last_year
                .or(file.last_year)
                .unwrap_or(defaults.last_year),
            decimals: file.decimals.unwrap_or(defaults.decimals),
            gap_fill_fields: file.gap_fill_fields.unwrap_or(defaults.gap_fill_fields),
        };
        options.validate().context("invalid pipeline options")?;
        Ok(Self {
            data_dir: overrides
                .data_dir
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            output_dir: overrides
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            standards_dir: overrides
                .standards_dir
                .or(file.standards_dir)
                .unwrap_or_else(standards_root),
            options,
        })
    }
}
