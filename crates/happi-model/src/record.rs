use serde::{Deserialize, Serialize};

use crate::category::{DevelopmentCategory, PopulationCategory};

/// One (country, year) observation from a single source, or the merged view of all three.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub country: String,
    pub country_code: Option<String>,
    pub year: i32,
    pub rank: Option<u32>,
    pub score: Option<f64>,
    pub gdp_per_capita: Option<f64>,
    pub social_support: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub freedom: Option<f64>,
    pub corruption: Option<f64>,
    pub generosity: Option<f64>,
    pub dystopia_residual: Option<f64>,
    pub region: Option<String>,
    pub continent: Option<String>,
    pub hdi: Option<f64>,
    pub population: Option<f64>,
    pub pop_male: Option<f64>,
    pub pop_female: Option<f64>,
    pub population_density: Option<f64>,
}

impl CanonicalRecord {
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            year,
            ..Self::default()
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            country: self.country.clone(),
            country_code: self.country_code.clone(),
            year: self.year,
        }
    }
}

/// Join key used by the merge stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub country: String,
    pub country_code: Option<String>,
    pub year: i32,
}

/// Merged observation plus the fields derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    #[serde(flatten)]
    pub record: CanonicalRecord,
    pub weighted_score: Option<f64>,
    pub population_category: Option<PopulationCategory>,
    pub development_category: Option<DevelopmentCategory>,
}

impl MergedRecord {
    /// Wraps a record and computes its derived fields.
    pub fn from_record(record: CanonicalRecord) -> Self {
        let weighted_score = match (record.score, record.population) {
            (Some(score), Some(population)) => Some(score * population),
            _ => None,
        };
        let population_category = record.population.and_then(PopulationCategory::from_population);
        let development_category = record.hdi.and_then(DevelopmentCategory::from_hdi);
        Self {
            record,
            weighted_score,
            population_category,
            development_category,
        }
    }
}
