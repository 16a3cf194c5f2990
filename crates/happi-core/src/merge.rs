//! Left-joins the three canonical sets and applies the record-level transforms.

use std::collections::HashMap;

use happi_model::{CanonicalRecord, MergedRecord, PipelineError, PipelineOptions, RecordKey};
use happi_standards::ReferenceTables;
use happi_transform::{GeographyField, backfill_from_siblings, derive_geography, enrich, gap_fill};
use tracing::info;

/// Canonical record sets, one per source.
#[derive(Debug, Clone, Default)]
pub struct SourceSets {
    pub happiness: Vec<CanonicalRecord>,
    pub hdi: Vec<CanonicalRecord>,
    pub population: Vec<CanonicalRecord>,
}

/// Counters describing what the merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub rows: usize,
    pub hdi_matched: usize,
    pub population_matched: usize,
    pub regions_backfilled: usize,
    pub continents_backfilled: usize,
    pub geography_derived: usize,
    pub values_filled: usize,
}

#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub records: Vec<MergedRecord>,
    pub stats: MergeStats,
}

/// Merges the three sets on (country, country code, year).
///
/// Every happiness row survives exactly once, in input order. HDI and
/// population only contribute to rows they match. Fails only when there is
/// no happiness data at all.
pub fn merge(
    sets: SourceSets,
    tables: &ReferenceTables,
    options: &PipelineOptions,
) -> happi_model::Result<MergeOutput> {
    let SourceSets {
        happiness,
        hdi,
        population,
    } = sets;
    if happiness.is_empty() {
        return Err(PipelineError::PrimarySourceMissing {
            first: options.first_year,
            last: options.last_year,
        });
    }

    let hdi_index = index_by_key(hdi);
    let population_index = index_by_key(population);
    let mut stats = MergeStats {
        rows: happiness.len(),
        ..MergeStats::default()
    };

    let mut records = happiness;
    for record in &mut records {
        let key = record.key();
        if let Some(matched) = hdi_index.get(&key) {
            record.hdi = matched.hdi;
            stats.hdi_matched += 1;
        }
        if let Some(matched) = population_index.get(&key) {
            record.population = matched.population;
            record.pop_male = matched.pop_male;
            record.pop_female = matched.pop_female;
            record.population_density = matched.population_density;
            stats.population_matched += 1;
        }
    }

    // Siblings first: the lookup only covers countries that never report the field.
    stats.regions_backfilled = backfill_from_siblings(&mut records, GeographyField::Region);
    stats.continents_backfilled = backfill_from_siblings(&mut records, GeographyField::Continent);
    stats.geography_derived = derive_geography(&mut records, tables);
    stats.values_filled = gap_fill(&mut records, &options.gap_fill_fields);

    info!(
        rows = stats.rows,
        hdi_matched = stats.hdi_matched,
        population_matched = stats.population_matched,
        regions_backfilled = stats.regions_backfilled,
        continents_backfilled = stats.continents_backfilled,
        geography_derived = stats.geography_derived,
        values_filled = stats.values_filled,
        "sources merged"
    );
    Ok(MergeOutput {
        records: enrich(records),
        stats,
    })
}

/// Keys a secondary set; loaders already guarantee one row per key.
fn index_by_key(records: Vec<CanonicalRecord>) -> HashMap<RecordKey, CanonicalRecord> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.entry(record.key()).or_insert(record);
    }
    index
}
