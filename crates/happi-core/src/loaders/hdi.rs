use happi_map::{ColumnHarmonizer, NameNormalizer};
use happi_model::{CanonicalField, CanonicalRecord, IssueKind, Metric, SourceKind};
use tracing::debug;

use super::{
    RawTable, SourceLoader, country_text, read_metrics, resolve_name, structural_failure,
};
use crate::context::LoadContext;
use crate::frame::CanonicalRows;

const FIELDS: [CanonicalField; 3] = [
    CanonicalField::Country,
    CanonicalField::Year,
    CanonicalField::Metric(Metric::Hdi),
];

/// Human development index, one long table with a year column.
///
/// Aggregate entities (world, income groups, regions) are removed by the
/// denylist before normalization, and rows without a code are dropped.
pub struct HdiLoader;

impl SourceLoader for HdiLoader {
    fn source(&self) -> SourceKind {
        SourceKind::Hdi
    }

    fn description(&self) -> &'static str {
        "Human Development Index long table"
    }

    fn long_format(&self) -> bool {
        true
    }

    fn load_table(&self, table: &RawTable, ctx: &mut LoadContext<'_>) -> Vec<CanonicalRecord> {
        let source = self.source();
        let map = ColumnHarmonizer::new(ctx.tables, source).harmonize_frame(&table.frame);
        for (field, reason) in [
            (CanonicalField::Country, "no entity column"),
            (CanonicalField::Year, "no year column"),
            (CanonicalField::Metric(Metric::Hdi), "no index column"),
        ] {
            if !map.contains(field) {
                structural_failure(table, source, ctx, reason);
                return Vec::new();
            }
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

        let mut records = Vec::new();
        let mut out_of_range = 0usize;
        let mut aggregates = 0usize;
        let mut uncoded = 0usize;
        for row in 0..rows.height() {
            let Some(raw) = country_text(&rows, row, source, table.year, ctx) else {
                continue;
            };
            let year = match rows.integer(CanonicalField::Year, row) {
                Some(Some(year)) => i32::try_from(year).ok(),
                _ => None,
            };
            let Some(year) = year else {
                ctx.issue(
                    IssueKind::MalformedRow,
                    source,
                    None,
                    format!("{raw}: invalid year"),
                );
                continue;
            };
            if !ctx.options.contains_year(year) {
                out_of_range += 1;
                continue;
            }
            if ctx.tables.is_aggregate_label(&raw) {
                aggregates += 1;
                continue;
            }
            let resolved = resolve_name(&normalizer, &raw, source, year, ctx);
            if resolved.code.is_none() {
                uncoded += 1;
                continue;
            }
            let mut record = CanonicalRecord::new(resolved.canonical, year);
            record.country_code = resolved.code;
            read_metrics(&rows, &[Metric::Hdi], row, &mut record, source, ctx);
            records.push(record);
        }
        debug!(
            records = records.len(),
            out_of_range,
            aggregates,
            uncoded,
            "hdi table filtered"
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happi_model::PipelineOptions;
    use happi_standards::{CountryKind, ReferenceTables};
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

    fn tables() -> ReferenceTables {
        ReferenceTables::builder()
            .column(SourceKind::Hdi, "Entity", CanonicalField::Country)
            .column(SourceKind::Hdi, "Year", CanonicalField::Year)
            .column(
                SourceKind::Hdi,
                "Human Development Index",
                CanonicalField::Metric(Metric::Hdi),
            )
            .alias("Syrian Arab Republic", "Syria")
            .code("Syria", "SYR", CountryKind::Country)
            .code("United Arab Emirates", "ARE", CountryKind::Country)
            .code("Norway", "NOR", CountryKind::Country)
            .aggregate_label("World")
            .aggregate_label("Arab States")
            .aggregate_label("income")
            .build()
            .unwrap()
    }

    #[test]
    fn filters_years_aggregates_and_uncoded_rows() {
        let tables = tables();
        let options = PipelineOptions::default();
        let mut ctx = LoadContext::new(&tables, &options);
        let df = DataFrame::new(vec![
            Series::new(
                "Entity".into(),
                vec![
                    "Norway",
                    "Norway",
                    "World",
                    "Arab States (UNDP)",
                    "High-income countries",
                    "United Arab Emirates",
                    "Syrian Arab Republic",
                    "Atlantis",
                ],
            )
            .into_column(),
            Series::new(
                "Year".into(),
                vec!["2014", "2019", "2019", "2019", "2019", "2019", "2019", "2019"],
            )
            .into_column(),
            Series::new(
                "Human Development Index".into(),
                vec!["0.94", "0.957", "0.73", "0.7", "0.9", "0.89", "0.57", "0.5"],
            )
            .into_column(),
        ])
        .unwrap();
        let table = RawTable::long(df, "human-development-index.csv");

        let records = HdiLoader.load_table(&table, &mut ctx);

        let countries: Vec<_> = records.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["Norway", "United Arab Emirates", "Syria"]);
        assert_eq!(records[0].year, 2019);
        assert_eq!(records[0].hdi, Some(0.957));
        assert_eq!(ctx.issues().count(IssueKind::UnresolvedName), 1);
    }

    #[test]
    fn missing_year_column_is_structural() {
        let tables = tables();
        let options = PipelineOptions::default();
        let mut ctx = LoadContext::new(&tables, &options);
        let df = DataFrame::new(vec![
            Series::new("Entity".into(), vec!["Norway"]).into_column(),
            Series::new("Human Development Index".into(), vec!["0.9"]).into_column(),
        ])
        .unwrap();
        let records = HdiLoader.load_table(&RawTable::long(df, "hdi.csv"), &mut ctx);
        assert!(records.is_empty());
        assert_eq!(ctx.issues().count(IssueKind::StructuralFailure), 1);
    }
}
