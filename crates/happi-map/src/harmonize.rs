//! Header harmonization: many historical spellings onto one canonical field set.

use std::collections::BTreeSet;

use happi_model::{CanonicalField, SourceKind};
use happi_standards::ReferenceTables;
use polars::prelude::{Column, DataFrame, PolarsResult};
use tracing::debug;

/// One raw header and the canonical field it renames to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMapping {
    pub raw: String,
    /// `None` means the header passes through unchanged.
    pub field: Option<CanonicalField>,
}

/// Rename mapping for one yearly table, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap {
    pub headers: Vec<HeaderMapping>,
}

impl RenameMap {
    /// Raw header feeding `field`. When several headers map to one field the first wins.
    pub fn column_for(&self, field: CanonicalField) -> Option<&str> {
        self.headers
            .iter()
            .find(|mapping| mapping.field == Some(field))
            .map(|mapping| mapping.raw.as_str())
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.column_for(field).is_some()
    }

    /// Canonical fields present in the table.
    pub fn fields(&self) -> BTreeSet<CanonicalField> {
        self.headers.iter().filter_map(|mapping| mapping.field).collect()
    }

    /// Headers with no canonical counterpart.
    pub fn unmapped(&self) -> impl Iterator<Item = &str> {
        self.headers
            .iter()
            .filter(|mapping| mapping.field.is_none())
            .map(|mapping| mapping.raw.as_str())
    }

    /// Renames `df` to canonical names and keeps only `allowed` fields that are present.
    pub fn project(&self, df: &DataFrame, allowed: &[CanonicalField]) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::new();
        for field in allowed {
            if let Some(raw) = self.column_for(*field) {
                let column = df.column(raw)?.clone().with_name(field.as_str().into());
                columns.push(column);
            }
        }
        DataFrame::new(columns)
    }
}

/// Maps the headers of one source's tables onto canonical fields.
#[derive(Debug, Clone, Copy)]
pub struct ColumnHarmonizer<'a> {
    tables: &'a ReferenceTables,
    source: SourceKind,
}

impl<'a> ColumnHarmonizer<'a> {
    pub fn new(tables: &'a ReferenceTables, source: SourceKind) -> Self {
        Self { tables, source }
    }

    pub fn harmonize<S: AsRef<str>>(&self, raw_headers: &[S]) -> RenameMap {
        let mut seen = BTreeSet::new();
        let mut headers = Vec::with_capacity(raw_headers.len());
        for raw in raw_headers {
            let raw = raw.as_ref();
            let field = self.tables.column_field(self.source, raw);
            if let Some(field) = field
                && !seen.insert(field)
            {
                debug!(
                    source = %self.source,
                    header = raw,
                    field = %field,
                    "duplicate header for canonical field ignored"
                );
            }
            headers.push(HeaderMapping {
                raw: raw.to_string(),
                field,
            });
        }
        RenameMap { headers }
    }

    /// Convenience over [`harmonize`](Self::harmonize) for a polars frame.
    pub fn harmonize_frame(&self, df: &DataFrame) -> RenameMap {
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        self.harmonize(&names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happi_model::Metric;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn tables() -> ReferenceTables {
        ReferenceTables::builder()
            .column(SourceKind::Happiness, "Country", CanonicalField::Country)
            .column(SourceKind::Happiness, "Country name", CanonicalField::Country)
            .column(
                SourceKind::Happiness,
                "Happiness Score",
                CanonicalField::Metric(Metric::Score),
            )
            .column(
                SourceKind::Happiness,
                "Ladder score",
                CanonicalField::Metric(Metric::Score),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn unknown_headers_pass_through() {
        let tables = tables();
        let harmonizer = ColumnHarmonizer::new(&tables, SourceKind::Happiness);
        let map = harmonizer.harmonize(&["Country", "Happiness.Score", "Standard Error"]);
        assert_eq!(map.column_for(CanonicalField::Country), Some("Country"));
        assert_eq!(
            map.column_for(CanonicalField::Metric(Metric::Score)),
            Some("Happiness.Score")
        );
        assert_eq!(map.unmapped().collect::<Vec<_>>(), vec!["Standard Error"]);
    }

    #[test]
    fn first_header_wins_for_a_field() {
        let tables = tables();
        let harmonizer = ColumnHarmonizer::new(&tables, SourceKind::Happiness);
        let map = harmonizer.harmonize(&["Ladder score", "Country name", "Happiness Score"]);
        assert_eq!(
            map.column_for(CanonicalField::Metric(Metric::Score)),
            Some("Ladder score")
        );
        assert_eq!(map.fields().len(), 2);
    }

    #[test]
    fn project_renames_and_drops() {
        let tables = tables();
        let df = DataFrame::new(vec![
            Series::new("Country name".into(), vec!["Finland"]).into_column(),
            Series::new("Ladder score".into(), vec!["7.7"]).into_column(),
            Series::new("upperwhisker".into(), vec!["7.8"]).into_column(),
        ])
        .unwrap();
        let harmonizer = ColumnHarmonizer::new(&tables, SourceKind::Happiness);
        let map = harmonizer.harmonize_frame(&df);
        let projected = map
            .project(
                &df,
                &[
                    CanonicalField::Country,
                    CanonicalField::Region,
                    CanonicalField::Metric(Metric::Score),
                ],
            )
            .unwrap();
        let names: Vec<String> = projected
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["country", "score"]);
    }
}
