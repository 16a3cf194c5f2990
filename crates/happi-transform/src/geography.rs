//! Region and continent derivation.

use std::collections::BTreeMap;

use happi_model::CanonicalRecord;
use happi_standards::ReferenceTables;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeographyField {
    Region,
    Continent,
}

impl GeographyField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Continent => "continent",
        }
    }

    pub fn get(self, record: &CanonicalRecord) -> Option<&str> {
        match self {
            Self::Region => record.region.as_deref(),
            Self::Continent => record.continent.as_deref(),
        }
    }

    pub fn slot_mut(self, record: &mut CanonicalRecord) -> &mut Option<String> {
        match self {
            Self::Region => &mut record.region,
            Self::Continent => &mut record.continent,
        }
    }
}

/// Fills whichever of region/continent is absent from the other, row by row.
///
/// Unmapped values leave the missing side absent. Returns the number of values derived.
pub fn derive_geography(records: &mut [CanonicalRecord], tables: &ReferenceTables) -> usize {
    let mut derived = 0;
    for record in records.iter_mut() {
        match (&record.region, &record.continent) {
            (Some(region), None) => {
                record.continent = tables.continent_for_region(region).map(str::to_string);
                derived += usize::from(record.continent.is_some());
            }
            (None, Some(continent)) => {
                record.region = tables.region_for_continent(continent).map(str::to_string);
                derived += usize::from(record.region.is_some());
            }
            _ => {}
        }
    }
    derived
}

/// Copies `field` into rows where it is absent from the same country's earliest year that has it.
pub fn backfill_from_siblings(records: &mut [CanonicalRecord], field: GeographyField) -> usize {
    let mut earliest: BTreeMap<String, (i32, String)> = BTreeMap::new();
    for record in records.iter() {
        let Some(value) = field.get(record) else {
            continue;
        };
        match earliest.get(&record.country) {
            Some((year, _)) if *year <= record.year => {}
            _ => {
                earliest.insert(record.country.clone(), (record.year, value.to_string()));
            }
        }
    }

    let mut filled = 0;
    for record in records.iter_mut() {
        if field.get(record).is_some() {
            continue;
        }
        if let Some((_, value)) = earliest.get(&record.country) {
            *field.slot_mut(record) = Some(value.clone());
            filled += 1;
        }
    }
    filled
}
