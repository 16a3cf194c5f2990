use happi_model::{CanonicalRecord, MergedRecord};

/// Attaches weighted score and category buckets to every record, preserving order.
pub fn enrich(records: Vec<CanonicalRecord>) -> Vec<MergedRecord> {
    records.into_iter().map(MergedRecord::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use happi_model::{DevelopmentCategory, PopulationCategory};

    #[test]
    fn enrich_keeps_every_row() {
        let mut large = CanonicalRecord::new("India", 2021);
        large.score = Some(3.8);
        large.population = Some(1_400_000.0);
        large.hdi = Some(0.633);
        let empty = CanonicalRecord::new("Beta", 2021);

        let merged = enrich(vec![large, empty]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].population_category, Some(PopulationCategory::VeryLarge));
        assert_eq!(merged[0].development_category, Some(DevelopmentCategory::Medium));
        assert_eq!(merged[0].weighted_score, Some(3.8 * 1_400_000.0));
        assert_eq!(merged[1].weighted_score, None);
        assert_eq!(merged[1].population_category, None);
        assert_eq!(merged[1].development_category, None);
    }
}
