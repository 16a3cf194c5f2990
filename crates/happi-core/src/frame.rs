//! Cell access over a harmonized (canonical-named) frame.

use std::collections::BTreeMap;

use happi_ingest::{NumericCell, any_to_i64, any_to_string, numeric_cell};
use happi_model::{CanonicalField, Metric};
use polars::prelude::{AnyValue, Column, DataFrame};

/// Row accessor keyed by canonical field.
pub struct CanonicalRows<'a> {
    columns: BTreeMap<CanonicalField, &'a Column>,
    height: usize,
}

impl<'a> CanonicalRows<'a> {
    /// Indexes the columns of `df` whose names parse as canonical fields.
    pub fn new(df: &'a DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .filter_map(|column| {
                column
                    .name()
                    .parse::<CanonicalField>()
                    .ok()
                    .map(|field| (field, column))
            })
            .collect();
        Self {
            columns,
            height: df.height(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn has(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }

    fn value(&self, field: CanonicalField, row: usize) -> AnyValue<'a> {
        self.columns
            .get(&field)
            .copied()
            .and_then(|column| column.get(row).ok())
            .unwrap_or(AnyValue::Null)
    }

    /// Trimmed text, `None` when absent or blank.
    pub fn text(&self, field: CanonicalField, row: usize) -> Option<String> {
        let text = any_to_string(self.value(field, row));
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn number(&self, metric: Metric, row: usize) -> NumericCell {
        numeric_cell(self.value(CanonicalField::Metric(metric), row))
    }

    /// Integral value; the outer `None` means absent, `Some(None)` means present but not an integer.
    pub fn integer(&self, field: CanonicalField, row: usize) -> Option<Option<i64>> {
        let value = self.value(field, row);
        if matches!(numeric_cell(value.clone()), NumericCell::Absent) {
            return None;
        }
        Some(any_to_i64(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn reads_canonical_columns_only() {
        let df = DataFrame::new(vec![
            Series::new("country".into(), vec![" Chad ", ""]).into_column(),
            Series::new("score".into(), vec!["4.1", "x"]).into_column(),
            Series::new("year".into(), vec!["2019", "2019.5"]).into_column(),
            Series::new("Whisker".into(), vec!["1", "2"]).into_column(),
        ])
        .unwrap();
        let rows = CanonicalRows::new(&df);
        assert_eq!(rows.height(), 2);
        assert_eq!(rows.text(CanonicalField::Country, 0).as_deref(), Some("Chad"));
        assert_eq!(rows.text(CanonicalField::Country, 1), None);
        assert_eq!(rows.number(Metric::Score, 0), NumericCell::Value(4.1));
        assert_eq!(
            rows.number(Metric::Score, 1),
            NumericCell::Invalid("x".to_string())
        );
        assert_eq!(rows.number(Metric::Hdi, 0), NumericCell::Absent);
        assert_eq!(rows.integer(CanonicalField::Year, 0), Some(Some(2019)));
        assert_eq!(rows.integer(CanonicalField::Year, 1), Some(None));
        assert!(!rows.has(CanonicalField::Region));
    }
}
