use std::fs;

use happi_ingest::{DataLayout, IngestError, discover_files, read_csv_table};
use happi_model::SourceKind;

#[test]
fn discovers_present_years_only() {
    let dir = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(dir.path());
    fs::create_dir_all(dir.path().join("happiness_score_data")).unwrap();
    fs::create_dir_all(dir.path().join("population_data")).unwrap();
    fs::write(layout.happiness_file(2015), "Country,Happiness Score\nFinland,7.5\n").unwrap();
    fs::write(layout.happiness_file(2017), "Country,Happiness.Score\nFinland,7.4\n").unwrap();
    fs::write(layout.population_file(2016), "Location,PopTotal\nFinland,5500\n").unwrap();

    let found = discover_files(&layout, 2015..=2017).unwrap();

    assert_eq!(found.happiness.keys().copied().collect::<Vec<_>>(), vec![2015, 2017]);
    assert_eq!(found.population.keys().copied().collect::<Vec<_>>(), vec![2016]);
    assert!(found.hdi.is_none());
    assert!(!found.has_source(SourceKind::Hdi));
    assert_eq!(found.file_count(), 3);

    let df = read_csv_table(&found.happiness[&2017]).unwrap();
    assert_eq!(df.height(), 1);
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(dir.path().join("absent"));
    let err = discover_files(&layout, 2015..=2024).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn header_only_file_has_no_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2020_report.csv");
    fs::write(&path, "\u{feff}Country name,Ladder score\n").unwrap();
    let df = read_csv_table(&path).unwrap();
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 2);
}
