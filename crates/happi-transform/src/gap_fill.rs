//! Per-country temporal gap-filling.

use std::collections::BTreeMap;

use happi_model::{CanonicalRecord, Metric};
use tracing::debug;

/// Carries each value forward over later gaps, then backward over leading gaps.
///
/// Returns the number of slots filled. An all-absent series stays all-absent.
pub fn forward_backward_fill(values: &mut [Option<f64>]) -> usize {
    let mut filled = 0;
    let mut last = None;
    for slot in values.iter_mut() {
        match slot {
            Some(value) => last = Some(*value),
            None => {
                if let Some(value) = last {
                    *slot = Some(value);
                    filled += 1;
                }
            }
        }
    }
    if let Some(first_known) = values.iter().position(Option::is_some) {
        let value = values[first_known];
        for slot in &mut values[..first_known] {
            *slot = value;
            filled += 1;
        }
    }
    filled
}

/// Fills `fields` per country across years. Rows are left in place; only values change.
pub fn gap_fill(records: &mut [CanonicalRecord], fields: &[Metric]) -> usize {
    let mut by_country: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        by_country
            .entry(record.country.as_str())
            .or_default()
            .push(index);
    }
    let mut groups: Vec<Vec<usize>> = by_country.into_values().collect();
    for indices in &mut groups {
        indices.sort_by_key(|&index| records[index].year);
    }

    let mut filled = 0;
    for indices in &groups {
        for &field in fields {
            let mut series: Vec<Option<f64>> =
                indices.iter().map(|&i| field.get(&records[i])).collect();
            let count = forward_backward_fill(&mut series);
            if count == 0 {
                continue;
            }
            filled += count;
            for (&i, value) in indices.iter().zip(series) {
                *field.slot_mut(&mut records[i]) = value;
            }
        }
    }
    debug!(
        countries = groups.len(),
        fields = fields.len(),
        filled,
        "gap fill applied"
    );
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_forward_then_backward() {
        let mut values = vec![None, Some(1.0), None, None, Some(4.0), None];
        let filled = forward_backward_fill(&mut values);
        assert_eq!(
            values,
            vec![Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(4.0), Some(4.0)]
        );
        assert_eq!(filled, 4);
    }

    #[test]
    fn all_absent_stays_absent() {
        let mut values = vec![None, None, None];
        assert_eq!(forward_backward_fill(&mut values), 0);
        assert!(values.iter().all(Option::is_none));
    }

    #[test]
    fn fills_in_year_order_regardless_of_row_order() {
        let mut records: Vec<CanonicalRecord> = [2017, 2015, 2016]
            .into_iter()
            .map(|year| CanonicalRecord::new("Chad", year))
            .collect();
        records[0].hdi = Some(0.4);
        records[1].hdi = Some(0.39);
        let filled = gap_fill(&mut records, &[Metric::Hdi]);
        assert_eq!(filled, 1);
        // 2016 takes the 2015 value, not the 2017 one.
        assert_eq!(records[2].hdi, Some(0.39));
    }

    #[test]
    fn countries_fill_independently() {
        let mut a = CanonicalRecord::new("A", 2015);
        a.population = Some(100.0);
        let b = CanonicalRecord::new("B", 2016);
        let mut records = vec![a, b, CanonicalRecord::new("A", 2016)];
        gap_fill(&mut records, &[Metric::Population]);
        assert_eq!(records[2].population, Some(100.0));
        assert_eq!(records[1].population, None);
    }
}
