use happi_map::{ColumnHarmonizer, NameNormalizer};
use happi_model::{CanonicalField, CanonicalRecord, IssueKind, Metric, SourceKind};
use happi_transform::assign_ranks;
use tracing::debug;

use super::{
    RawTable, SourceLoader, country_text, dedupe_keys, read_metrics, resolve_name,
    structural_failure,
};
use crate::context::LoadContext;
use crate::frame::CanonicalRows;

const METRICS: [Metric; 8] = [
    Metric::Score,
    Metric::GdpPerCapita,
    Metric::SocialSupport,
    Metric::LifeExpectancy,
    Metric::Freedom,
    Metric::Corruption,
    Metric::Generosity,
    Metric::DystopiaResidual,
];

const FIELDS: [CanonicalField; 12] = [
    CanonicalField::Country,
    CanonicalField::Rank,
    CanonicalField::Region,
    CanonicalField::Continent,
    CanonicalField::Metric(Metric::Score),
    CanonicalField::Metric(Metric::GdpPerCapita),
    CanonicalField::Metric(Metric::SocialSupport),
    CanonicalField::Metric(Metric::LifeExpectancy),
    CanonicalField::Metric(Metric::Freedom),
    CanonicalField::Metric(Metric::Corruption),
    CanonicalField::Metric(Metric::Generosity),
    CanonicalField::Metric(Metric::DystopiaResidual),
];

/// Yearly well-being report tables.
///
/// Rank comes from the table when it has one, otherwise it is computed from
/// score over the table's distinct countries. Region and continent are kept as
/// given; the merge reconciles them across years.
pub struct HappinessLoader;

impl SourceLoader for HappinessLoader {
    fn source(&self) -> SourceKind {
        SourceKind::Happiness
    }

    fn description(&self) -> &'static str {
        "World Happiness Report yearly tables"
    }

    fn load_table(&self, table: &RawTable, ctx: &mut LoadContext<'_>) -> Vec<CanonicalRecord> {
        let source = self.source();
        let Some(year) = table.year else {
            structural_failure(table, source, ctx, "happiness table without a year");
            return Vec::new();
        };
        let map = ColumnHarmonizer::new(ctx.tables, source).harmonize_frame(&table.frame);
        if !map.contains(CanonicalField::Country) {
            structural_failure(table, source, ctx, "no country column");
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
        let has_rank = rows.has(CanonicalField::Rank);

        let mut records = Vec::with_capacity(rows.height());
        for row in 0..rows.height() {
            let Some(raw) = country_text(&rows, row, source, Some(year), ctx) else {
                continue;
            };
            let resolved = resolve_name(&normalizer, &raw, source, year, ctx);
            let mut record = CanonicalRecord::new(resolved.canonical, year);
            record.country_code = resolved.code;
            read_metrics(&rows, &METRICS, row, &mut record, source, ctx);
            record.region = rows.text(CanonicalField::Region, row);
            record.continent = rows.text(CanonicalField::Continent, row);
            if has_rank {
                record.rank = match rows.integer(CanonicalField::Rank, row) {
                    None => None,
                    Some(Some(rank)) if rank >= 1 => u32::try_from(rank).ok(),
                    Some(_) => {
                        ctx.issue(
                            IssueKind::MalformedRow,
                            source,
                            Some(year),
                            format!("{}: invalid rank", record.country),
                        );
                        None
                    }
                };
            }
            records.push(record);
        }

        let mut records = dedupe_keys(records, source, ctx);
        if !has_rank {
            assign_ranks(&mut records);
        }
        debug!(
            year,
            records = records.len(),
            computed_rank = !has_rank,
            unmapped_headers = map.unmapped().count(),
            "happiness table harmonized"
        );
        records
    }
}
