//! Reshaped views over the merged record set.

use std::collections::BTreeMap;

use happi_model::{MergedRecord, Metric, PopulationCategory};
use serde::Serialize;

use crate::aggregate::{Mean, MetricMeans, Sum};
use crate::correlation::{CorrelationMatrix, correlation_matrix};

/// Latest-year snapshot of one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySnapshot {
    pub country: String,
    pub continent: Option<String>,
    pub country_code: Option<String>,
    pub score: Option<f64>,
    pub hdi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentRow {
    pub continent: String,
    pub year: i32,
    #[serde(flatten)]
    pub means: BTreeMap<Metric, Option<f64>>,
    /// Summed, not averaged; absent when no row in the group has a population.
    pub population: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub year: i32,
    #[serde(flatten)]
    pub means: BTreeMap<Metric, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub population_category: PopulationCategory,
    pub year: i32,
    pub score: Option<f64>,
    pub hdi: Option<f64>,
    pub num_countries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletenessRow {
    pub year: i32,
    pub total_countries: usize,
    pub has_happiness: usize,
    pub has_hdi: usize,
    pub has_population: usize,
    pub complete_records: usize,
}

/// Every export view, computed once from the merged records.
#[derive(Debug, Clone)]
pub struct ExportViews<'a> {
    pub records: &'a [MergedRecord],
    pub time_series: BTreeMap<&'a str, Vec<&'a MergedRecord>>,
    pub countries: Vec<CountrySnapshot>,
    pub continents: Vec<ContinentRow>,
    pub trends: Vec<TrendRow>,
    pub correlations: CorrelationMatrix,
    pub categories: Vec<CategoryRow>,
    pub completeness: BTreeMap<String, CompletenessRow>,
}

impl<'a> ExportViews<'a> {
    pub fn build(records: &'a [MergedRecord]) -> Self {
        Self {
            records,
            time_series: time_series(records),
            countries: country_directory(records),
            continents: continent_summary(records),
            trends: global_trends(records),
            correlations: correlation_matrix(records, &Metric::WELLBEING),
            categories: category_breakdown(records),
            completeness: completeness(records),
        }
    }
}

fn time_series(records: &[MergedRecord]) -> BTreeMap<&str, Vec<&MergedRecord>> {
    let mut series: BTreeMap<&str, Vec<&MergedRecord>> = BTreeMap::new();
    for merged in records {
        series.entry(merged.record.country.as_str()).or_default().push(merged);
    }
    for rows in series.values_mut() {
        rows.sort_by_key(|merged| merged.record.year);
    }
    series
}

/// One row per country from its most recent year, ordered by name.
fn country_directory(records: &[MergedRecord]) -> Vec<CountrySnapshot> {
    let mut latest: BTreeMap<&str, &MergedRecord> = BTreeMap::new();
    for merged in records {
        let entry = latest.entry(merged.record.country.as_str()).or_insert(merged);
        if merged.record.year > entry.record.year {
            *entry = merged;
        }
    }
    latest
        .into_values()
        .map(|merged| CountrySnapshot {
            country: merged.record.country.clone(),
            continent: merged.record.continent.clone(),
            country_code: merged.record.country_code.clone(),
            score: merged.record.score,
            hdi: merged.record.hdi,
        })
        .collect()
}

fn continent_summary(records: &[MergedRecord]) -> Vec<ContinentRow> {
    let mut groups: BTreeMap<(&str, i32), (MetricMeans, Sum)> = BTreeMap::new();
    for merged in records {
        let Some(continent) = merged.record.continent.as_deref() else {
            continue;
        };
        let (means, population) = groups.entry((continent, merged.record.year)).or_default();
        means.add(&Metric::WELLBEING, merged);
        population.add(merged.record.population);
    }
    groups
        .into_iter()
        .map(|((continent, year), (means, population))| ContinentRow {
            continent: continent.to_string(),
            year,
            means: means.finish(&Metric::WELLBEING),
            population: population.value(),
        })
        .collect()
}

fn global_trends(records: &[MergedRecord]) -> Vec<TrendRow> {
    let mut groups: BTreeMap<i32, MetricMeans> = BTreeMap::new();
    for merged in records {
        groups
            .entry(merged.record.year)
            .or_default()
            .add(&Metric::WELLBEING, merged);
    }
    groups
        .into_iter()
        .map(|(year, means)| TrendRow {
            year,
            means: means.finish(&Metric::WELLBEING),
        })
        .collect()
}

fn category_breakdown(records: &[MergedRecord]) -> Vec<CategoryRow> {
    let mut groups: BTreeMap<(PopulationCategory, i32), (Mean, Mean, usize)> = BTreeMap::new();
    for merged in records {
        let Some(category) = merged.population_category else {
            continue;
        };
        let (score, hdi, count) = groups.entry((category, merged.record.year)).or_default();
        score.add(merged.record.score);
        hdi.add(merged.record.hdi);
        *count += 1;
    }
    groups
        .into_iter()
        .map(|((population_category, year), (score, hdi, num_countries))| CategoryRow {
            population_category,
            year,
            score: score.value(),
            hdi: hdi.value(),
            num_countries,
        })
        .collect()
}

/// Year (as a string key) to integrity counts.
fn completeness(records: &[MergedRecord]) -> BTreeMap<String, CompletenessRow> {
    let mut years: BTreeMap<i32, CompletenessRow> = BTreeMap::new();
    for merged in records {
        let record = &merged.record;
        let row = years.entry(record.year).or_insert(CompletenessRow {
            year: record.year,
            total_countries: 0,
            has_happiness: 0,
            has_hdi: 0,
            has_population: 0,
            complete_records: 0,
        });
        row.total_countries += 1;
        row.has_happiness += usize::from(record.score.is_some());
        row.has_hdi += usize::from(record.hdi.is_some());
        row.has_population += usize::from(record.population.is_some());
        row.complete_records += usize::from(
            Metric::CORE
                .iter()
                .all(|metric| metric.get(record).is_some()),
        );
    }
    years
        .into_iter()
        .map(|(year, row)| (year.to_string(), row))
        .collect()
}
