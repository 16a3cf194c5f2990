use happi_map::{ColumnHarmonizer, NameNormalizer};
use happi_model::{CanonicalField, CanonicalRecord, Metric, SourceKind};
use tracing::debug;

use super::{
    RawTable, SourceLoader, country_text, read_metrics, resolve_name, structural_failure,
};
use crate::context::LoadContext;
use crate::frame::CanonicalRows;

/// Discriminator value marking country-level rows.
const COUNTRY_LEVEL: &str = "Country/Area";

const METRICS: [Metric; 4] = [
    Metric::Population,
    Metric::PopMale,
    Metric::PopFemale,
    Metric::PopulationDensity,
];

const FIELDS: [CanonicalField; 6] = [
    CanonicalField::Country,
    CanonicalField::LocationType,
    CanonicalField::Metric(Metric::Population),
    CanonicalField::Metric(Metric::PopMale),
    CanonicalField::Metric(Metric::PopFemale),
    CanonicalField::Metric(Metric::PopulationDensity),
];

/// Yearly population tables (thousands of people).
pub struct PopulationLoader;

impl SourceLoader for PopulationLoader {
    fn source(&self) -> SourceKind {
        SourceKind::Population
    }

    fn description(&self) -> &'static str {
        "UN World Population Prospects yearly tables"
    }

    fn load_table(&self, table: &RawTable, ctx: &mut LoadContext<'_>) -> Vec<CanonicalRecord> {
        let source = self.source();
        let Some(year) = table.year else {
            structural_failure(table, source, ctx, "population table without a year");
            return Vec::new();
        };
        let map = ColumnHarmonizer::new(ctx.tables, source).harmonize_frame(&table.frame);
        if !map.contains(CanonicalField::Country) {
            structural_failure(table, source, ctx, "no location column");
            return Vec::new();
        }
        let frame = match map.project(&table.frame, &FIELDS) {
            Ok(frame) => frame,
            Err(err) => {
                structural_failure(table, source, ctx, &err.to_string());
                return Vec::new();
            }
        };
        let rows = CanonicalRows::new(&frame);
        let normalizer = NameNormalizer::new(ctx.tables);
        let filter_locations = rows.has(CanonicalField::LocationType);

        let mut records = Vec::with_capacity(rows.height());
        let mut regional = 0usize;
        for row in 0..rows.height() {
            if filter_locations {
                let location_type = rows.text(CanonicalField::LocationType, row);
                if !location_type.is_some_and(|value| value.eq_ignore_ascii_case(COUNTRY_LEVEL)) {
                    regional += 1;
                    continue;
                }
            }
            let Some(raw) = country_text(&rows, row, source, Some(year), ctx) else {
                continue;
            };
            let resolved = resolve_name(&normalizer, &raw, source, year, ctx);
            let mut record = CanonicalRecord::new(resolved.canonical, year);
            record.country_code = resolved.code;
            read_metrics(&rows, &METRICS, row, &mut record, source, ctx);
            records.push(record);
        }
        debug!(
            year,
            records = records.len(),
            regional,
            has_density = rows.has(CanonicalField::Metric(Metric::PopulationDensity)),
            "population table filtered"
        );
        records
    }
}
