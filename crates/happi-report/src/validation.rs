//! Post-run data quality summary.

use std::collections::{BTreeMap, BTreeSet};

use happi_model::MergedRecord;
use serde::Serialize;

/// Scores below this are reported as unusually low.
pub const OUTLIER_LOW: f64 = 2.5;
/// Scores above this are reported as unusually high.
pub const OUTLIER_HIGH: f64 = 8.5;

const LISTED_NAMES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearCoverage {
    pub year: i32,
    pub rows: usize,
    pub happiness_pct: f64,
    pub hdi_pct: f64,
    pub population_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub unique_countries: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub coverage: Vec<YearCoverage>,
    /// Countries with at least one row lacking a score, in name order.
    pub missing_happiness: Vec<String>,
    pub missing_hdi: Vec<String>,
    pub score_range: Option<(f64, f64)>,
    pub low_outliers: Vec<String>,
    pub high_outliers: Vec<String>,
}

impl ValidationSummary {
    /// First ten names and an "and N more" suffix.
    pub fn abbreviate(names: &[String]) -> String {
        let shown = names
            .iter()
            .take(LISTED_NAMES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if names.len() > LISTED_NAMES {
            format!("{shown} and {} more", names.len() - LISTED_NAMES)
        } else {
            shown
        }
    }
}

pub fn validation_summary(records: &[MergedRecord]) -> ValidationSummary {
    let mut countries = BTreeSet::new();
    let mut by_year: BTreeMap<i32, [usize; 4]> = BTreeMap::new();
    let mut missing_happiness = BTreeSet::new();
    let mut missing_hdi = BTreeSet::new();
    let mut low = BTreeSet::new();
    let mut high = BTreeSet::new();
    let mut score_range: Option<(f64, f64)> = None;

    for merged in records {
        let record = &merged.record;
        countries.insert(record.country.as_str());
        let counts = by_year.entry(record.year).or_default();
        counts[0] += 1;
        counts[1] += usize::from(record.score.is_some());
        counts[2] += usize::from(record.hdi.is_some());
        counts[3] += usize::from(record.population.is_some());
        if record.hdi.is_none() {
            missing_hdi.insert(record.country.clone());
        }
        let Some(score) = record.score else {
            missing_happiness.insert(record.country.clone());
            continue;
        };
        score_range = Some(match score_range {
            Some((min, max)) => (min.min(score), max.max(score)),
            None => (score, score),
        });
        if score < OUTLIER_LOW {
            low.insert(record.country.clone());
        }
        if score > OUTLIER_HIGH {
            high.insert(record.country.clone());
        }
    }

    let percent = |part: usize, total: usize| 100.0 * part as f64 / total as f64;
    ValidationSummary {
        unique_countries: countries.len(),
        first_year: by_year.keys().next().copied(),
        last_year: by_year.keys().next_back().copied(),
        coverage: by_year
            .into_iter()
            .map(|(year, [rows, happiness, hdi, population])| YearCoverage {
                year,
                rows,
                happiness_pct: percent(happiness, rows),
                hdi_pct: percent(hdi, rows),
                population_pct: percent(population, rows),
            })
            .collect(),
        missing_happiness: missing_happiness.into_iter().collect(),
        missing_hdi: missing_hdi.into_iter().collect(),
        score_range,
        low_outliers: low.into_iter().collect(),
        high_outliers: high.into_iter().collect(),
    }
}
