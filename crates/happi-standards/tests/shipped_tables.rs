//! Checks on the reference tables shipped under `standards/`.

use std::fs;

use happi_model::{CanonicalField, Metric, SourceKind};
use happi_standards::{CountryKind, ReferenceTables, StandardsError, standards_root};

fn shipped() -> ReferenceTables {
    ReferenceTables::load(&standards_root()).expect("load shipped standards")
}

#[test]
fn every_alias_target_has_a_code() {
    let tables = shipped();
    for (variant, canonical) in tables.aliases() {
        assert!(
            tables.code(canonical).is_some(),
            "alias {variant} -> {canonical} has no code"
        );
    }
}

#[test]
fn continents_do_not_collide_with_countries() {
    let tables = shipped();
    assert_eq!(tables.code("Namibia"), Some("NAM"));
    assert_eq!(tables.code("North America"), Some("XNAM"));
    let regions: Vec<_> = tables
        .code_entries()
        .filter(|entry| entry.kind == CountryKind::Region)
        .collect();
    assert_eq!(regions.len(), 6);
    for region in regions {
        assert!(region.code.starts_with('X') && region.code.len() == 4);
    }
}

#[test]
fn historical_headers_resolve() {
    let tables = shipped();
    let score = Some(CanonicalField::Metric(Metric::Score));
    for header in ["Happiness Score", "Happiness.Score", "Ladder score", "Life Ladder"] {
        assert_eq!(tables.column_field(SourceKind::Happiness, header), score, "{header}");
    }
    assert_eq!(
        tables.column_field(SourceKind::Happiness, "Economy..GDP.per.Capita."),
        Some(CanonicalField::Metric(Metric::GdpPerCapita))
    );
    for header in ["Happiness Rank", "Happiness.Rank", "Overall rank"] {
        assert_eq!(
            tables.column_field(SourceKind::Happiness, header),
            Some(CanonicalField::Rank),
            "{header}"
        );
    }
    assert_eq!(
        tables.column_field(SourceKind::Population, "Location"),
        Some(CanonicalField::Country)
    );
    assert_eq!(
        tables.column_field(SourceKind::Hdi, "Human Development Index"),
        Some(CanonicalField::Metric(Metric::Hdi))
    );
}

#[test]
fn region_lookups_are_loaded() {
    let tables = shipped();
    assert_eq!(tables.continent_for_region("Central America"), Some("North America"));
    assert_eq!(tables.region_for_continent("Oceania"), Some("Australia and New Zealand"));
    assert_eq!(tables.continent_for_region("Atlantis"), None);
    assert!(tables.fingerprint().is_some());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReferenceTables::load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
}

#[test]
fn fingerprint_changes_with_content() {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(standards_root()).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    let original = ReferenceTables::load(dir.path()).unwrap();

    let aliases = dir.path().join("country_aliases.csv");
    let mut content = fs::read_to_string(&aliases).unwrap();
    content.push_str("Holland,Netherlands\n");
    fs::write(&aliases, content).unwrap();
    let extended = ReferenceTables::load(dir.path()).unwrap();

    assert_eq!(extended.alias("Holland"), Some("Netherlands"));
    assert_ne!(original.fingerprint(), extended.fingerprint());
}
