//! Locates the per-year source files under a data root.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use happi_model::SourceKind;
use tracing::debug;

use crate::error::{IngestError, Result};

/// On-disk layout of the three sources below a data root.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn happiness_file(&self, year: i32) -> PathBuf {
        self.root
            .join("happiness_score_data")
            .join(format!("{year}_report.csv"))
    }

    /// The development index ships as one long table covering every year.
    pub fn hdi_file(&self) -> PathBuf {
        self.root
            .join("hdi_data")
            .join("human-development-index.csv")
    }

    pub fn population_file(&self, year: i32) -> PathBuf {
        self.root
            .join("population_data")
            .join(format!("population_{year}.csv"))
    }
}

/// Files found for a year range; absent years are simply not present in the maps.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredFiles {
    pub happiness: BTreeMap<i32, PathBuf>,
    pub hdi: Option<PathBuf>,
    pub population: BTreeMap<i32, PathBuf>,
}

impl DiscoveredFiles {
    pub fn file_count(&self) -> usize {
        self.happiness.len() + self.population.len() + usize::from(self.hdi.is_some())
    }

    pub fn has_source(&self, source: SourceKind) -> bool {
        match source {
            SourceKind::Happiness => !self.happiness.is_empty(),
            SourceKind::Hdi => self.hdi.is_some(),
            SourceKind::Population => !self.population.is_empty(),
        }
    }
}

/// Finds every source file for `years`. Only a missing data root is an error.
pub fn discover_files(layout: &DataLayout, years: RangeInclusive<i32>) -> Result<DiscoveredFiles> {
    if !layout.root().is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: layout.root().to_path_buf(),
        });
    }
    let mut found = DiscoveredFiles::default();
    for year in years {
        let happiness = layout.happiness_file(year);
        if happiness.is_file() {
            found.happiness.insert(year, happiness);
        }
        let population = layout.population_file(year);
        if population.is_file() {
            found.population.insert(year, population);
        }
    }
    let hdi = layout.hdi_file();
    if hdi.is_file() {
        found.hdi = Some(hdi);
    }
    debug!(
        root = %layout.root().display(),
        happiness = found.happiness.len(),
        population = found.population.len(),
        hdi = found.hdi.is_some(),
        "source files discovered"
    );
    Ok(found)
}
