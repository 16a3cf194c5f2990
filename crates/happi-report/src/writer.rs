//! Serializes the export views and records what was written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use happi_model::MergedRecord;
use happi_standards::hash::sha256_hex;
use serde::Serialize;
use tracing::{debug, info};

use crate::dictionary::DataDictionary;
use crate::mapping::UnresolvedNames;
use crate::round::{round_json, round_value};
use crate::views::ExportViews;

/// Files produced by a run, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFile {
    Records,
    RecordsCsv,
    TimeSeries,
    Countries,
    ContinentSummary,
    GlobalTrends,
    Correlations,
    PopulationCategories,
    Completeness,
    Dictionary,
    CountryMapping,
    Manifest,
}

impl OutputFile {
    pub const ALL: [OutputFile; 12] = [
        Self::Records,
        Self::RecordsCsv,
        Self::TimeSeries,
        Self::Countries,
        Self::ContinentSummary,
        Self::GlobalTrends,
        Self::Correlations,
        Self::PopulationCategories,
        Self::Completeness,
        Self::Dictionary,
        Self::CountryMapping,
        Self::Manifest,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Records => "happiness_data.json",
            Self::RecordsCsv => "happiness_data.csv",
            Self::TimeSeries => "time_series.json",
            Self::Countries => "countries.json",
            Self::ContinentSummary => "summary_by_continent.json",
            Self::GlobalTrends => "global_trends.json",
            Self::Correlations => "correlations.json",
            Self::PopulationCategories => "population_category_analysis.json",
            Self::Completeness => "data_completeness.json",
            Self::Dictionary => "data_dictionary.json",
            Self::CountryMapping => "country_mapping_generated.json",
            Self::Manifest => "manifest.json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub file: String,
    pub sha256: String,
    pub bytes: usize,
}

/// Digest of every file written in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub generated_at: String,
    pub record_count: usize,
    /// Fingerprint of the reference tables the run used.
    pub standards_fingerprint: Option<String>,
    pub files: Vec<ManifestEntry>,
    #[serde(skip)]
    pub output_dir: PathBuf,
}

impl Manifest {
    pub fn path(&self, file: OutputFile) -> PathBuf {
        self.output_dir.join(file.file_name())
    }
}

/// Writes every view under `output_dir`, creating it if needed.
///
/// Floats are rounded to `decimals` places after all aggregation, just before
/// serialization. `manifest.json` is written last and lists the other files.
pub fn write_outputs(
    output_dir: &Path,
    views: &ExportViews<'_>,
    dictionary: &DataDictionary,
    unresolved: &UnresolvedNames,
    decimals: u32,
    standards_fingerprint: Option<&str>,
) -> Result<Manifest> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let mut manifest = Manifest {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        record_count: views.records.len(),
        standards_fingerprint: standards_fingerprint.map(str::to_string),
        files: Vec::new(),
        output_dir: output_dir.to_path_buf(),
    };

    for file in OutputFile::ALL {
        let bytes = match file {
            OutputFile::Records => json_bytes(&views.records, decimals)?,
            OutputFile::RecordsCsv => csv_bytes(views.records, decimals)?,
            OutputFile::TimeSeries => json_bytes(&views.time_series, decimals)?,
            OutputFile::Countries => json_bytes(&views.countries, decimals)?,
            OutputFile::ContinentSummary => json_bytes(&views.continents, decimals)?,
            OutputFile::GlobalTrends => json_bytes(&views.trends, decimals)?,
            OutputFile::Correlations => json_bytes(&views.correlations, decimals)?,
            OutputFile::PopulationCategories => json_bytes(&views.categories, decimals)?,
            OutputFile::Completeness => json_bytes(&views.completeness, decimals)?,
            OutputFile::Dictionary => pretty_json_bytes(dictionary)?,
            OutputFile::CountryMapping => pretty_json_bytes(unresolved)?,
            OutputFile::Manifest => continue,
        };
        let path = output_dir.join(file.file_name());
        fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
        debug!(file = file.file_name(), bytes = bytes.len(), "output written");
        manifest.files.push(ManifestEntry {
            file: file.file_name().to_string(),
            sha256: sha256_hex(&bytes),
            bytes: bytes.len(),
        });
    }

    let path = manifest.path(OutputFile::Manifest);
    fs::write(&path, pretty_json_bytes(&manifest)?)
        .with_context(|| format!("write {}", path.display()))?;
    info!(
        output_dir = %output_dir.display(),
        files = manifest.files.len() + 1,
        records = manifest.record_count,
        "outputs written"
    );
    Ok(manifest)
}

fn json_bytes<T: Serialize + ?Sized>(value: &T, decimals: u32) -> Result<Vec<u8>> {
    let mut document = serde_json::to_value(value).context("serialize view")?;
    round_json(&mut document, decimals);
    serde_json::to_vec(&document).context("encode json")
}

fn pretty_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).context("encode json")
}

const CSV_HEADER: [&str; 22] = [
    "country",
    "country_code",
    "year",
    "rank",
    "score",
    "gdp_per_capita",
    "social_support",
    "life_expectancy",
    "freedom",
    "corruption",
    "generosity",
    "dystopia_residual",
    "region",
    "continent",
    "hdi",
    "population",
    "pop_male",
    "pop_female",
    "population_density",
    "weighted_score",
    "population_category",
    "development_category",
];

/// Flat CSV rendering of the merged records; absent values are empty cells.
pub(crate) fn csv_bytes(records: &[MergedRecord], decimals: u32) -> Result<Vec<u8>> {
    let number = |value: Option<f64>| {
        value
            .map(|value| round_value(value, decimals).to_string())
            .unwrap_or_default()
    };
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).context("write csv header")?;
    for merged in records {
        let record = &merged.record;
        writer
            .write_record([
                record.country.clone(),
                record.country_code.clone().unwrap_or_default(),
                record.year.to_string(),
                record.rank.map(|rank| rank.to_string()).unwrap_or_default(),
                number(record.score),
                number(record.gdp_per_capita),
                number(record.social_support),
                number(record.life_expectancy),
                number(record.freedom),
                number(record.corruption),
                number(record.generosity),
                number(record.dystopia_residual),
                record.region.clone().unwrap_or_default(),
                record.continent.clone().unwrap_or_default(),
                number(record.hdi),
                number(record.population),
                number(record.pop_male),
                number(record.pop_female),
                number(record.population_density),
                number(merged.weighted_score),
                merged
                    .population_category
                    .map(|category| category.as_str().to_string())
                    .unwrap_or_default(),
                merged
                    .development_category
                    .map(|category| category.as_str().to_string())
                    .unwrap_or_default(),
            ])
            .with_context(|| format!("write csv row for {} {}", record.country, record.year))?;
    }
    writer.into_inner().context("flush csv")
}
