//! End-to-end load and merge scenarios over in-memory tables.

use happi_core::{
    HappinessLoader, HdiLoader, LoadContext, PopulationLoader, RawTable, SourceSets, load_source,
    merge,
};
use happi_model::{CanonicalField, IssueKind, Metric, PipelineOptions, SourceKind};
use happi_standards::{CountryKind, ReferenceTables};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn tables() -> ReferenceTables {
    ReferenceTables::builder()
        .column(SourceKind::Happiness, "Country", CanonicalField::Country)
        .column(SourceKind::Happiness, "Region", CanonicalField::Region)
        .column(SourceKind::Happiness, "Continent", CanonicalField::Continent)
        .column(SourceKind::Happiness, "Score", CanonicalField::Metric(Metric::Score))
        .column(
            SourceKind::Happiness,
            "GDP per capita",
            CanonicalField::Metric(Metric::GdpPerCapita),
        )
        .column(SourceKind::Hdi, "Entity", CanonicalField::Country)
        .column(SourceKind::Hdi, "Year", CanonicalField::Year)
        .column(
            SourceKind::Hdi,
            "Human Development Index",
            CanonicalField::Metric(Metric::Hdi),
        )
        .column(SourceKind::Population, "Location", CanonicalField::Country)
        .column(
            SourceKind::Population,
            "PopTotal",
            CanonicalField::Metric(Metric::Population),
        )
        .alias("US", "United States of America")
        .alias("USA", "United States of America")
        .code("United States of America", "USA", CountryKind::Country)
        .code("Canada", "CAN", CountryKind::Country)
        .region_continent("Southern Asia", "Asia")
        .region_continent("Eastern Asia", "Asia")
        .continent_region("Asia", "Eastern Asia")
        .build()
        .unwrap()
}

#[test]
fn alpha_beta_without_other_sources() {
    let tables = tables();
    let options = PipelineOptions::default();
    let mut ctx = LoadContext::new(&tables, &options);
    let happiness = vec![RawTable::yearly(
        2020,
        test_df(vec![("Country", vec!["Alpha", "Beta"]), ("Score", vec!["7.2", ""])]),
        "2020_report.csv",
    )];

    let loaded = load_source(&HappinessLoader, &happiness, &mut ctx);
    let output = merge(
        SourceSets {
            happiness: loaded.records,
            ..SourceSets::default()
        },
        &tables,
        &options,
    )
    .unwrap();

    assert_eq!(output.records.len(), 2);
    let alpha = &output.records[0];
    let beta = &output.records[1];
    assert_eq!((alpha.record.country.as_str(), alpha.record.rank), ("Alpha", Some(1)));
    assert_eq!((beta.record.country.as_str(), beta.record.rank), ("Beta", Some(2)));
    for merged in &output.records {
        assert_eq!(merged.record.year, 2020);
        assert_eq!(merged.weighted_score, None);
        assert_eq!(merged.record.hdi, None);
    }
}

#[test]
fn us_and_usa_merge_into_one_key() {
    let tables = tables();
    let options = PipelineOptions::default();
    let mut ctx = LoadContext::new(&tables, &options);

    let happiness = load_source(
        &HappinessLoader,
        &[RawTable::yearly(
            2019,
            test_df(vec![("Country", vec!["US"]), ("Score", vec!["6.892"])]),
            "2019_report.csv",
        )],
        &mut ctx,
    );
    let population = load_source(
        &PopulationLoader,
        &[RawTable::yearly(
            2019,
            test_df(vec![("Location", vec!["USA"]), ("PopTotal", vec!["329065"])]),
            "population_2019.csv",
        )],
        &mut ctx,
    );

    let output = merge(
        SourceSets {
            happiness: happiness.records,
            population: population.records,
            ..SourceSets::default()
        },
        &tables,
        &options,
    )
    .unwrap();

    assert_eq!(output.records.len(), 1);
    let merged = &output.records[0];
    assert_eq!(merged.record.country, "United States of America");
    assert_eq!(merged.record.country_code.as_deref(), Some("USA"));
    assert_eq!(merged.record.population, Some(329_065.0));
    assert_eq!(merged.weighted_score, Some(6.892 * 329_065.0));
}

#[test]
fn every_happiness_row_survives_once() {
    let tables = tables();
    let options = PipelineOptions::default();
    let mut ctx = LoadContext::new(&tables, &options);

    let happiness = load_source(
        &HappinessLoader,
        &[
            RawTable::yearly(
                2018,
                test_df(vec![
                    ("Country", vec!["Canada", "Atlantis", "US", "USA"]),
                    ("Score", vec!["7.3", "5.0", "6.9", "6.8"]),
                    ("GDP per capita", vec!["1.3", "", "", "1.4"]),
                ]),
                "2018_report.csv",
            ),
            RawTable::yearly(
                2019,
                test_df(vec![
                    ("Country", vec!["Canada", "Atlantis"]),
                    ("Score", vec!["7.2", "5.1"]),
                    ("GDP per capita", vec!["", ""]),
                ]),
                "2019_report.csv",
            ),
        ],
        &mut ctx,
    );
    let hdi = load_source(
        &HdiLoader,
        &[RawTable::long(
            test_df(vec![
                ("Entity", vec!["Canada", "Atlantis"]),
                ("Year", vec!["2018", "2018"]),
                ("Human Development Index", vec!["0.92", "0.6"]),
            ]),
            "human-development-index.csv",
        )],
        &mut ctx,
    );

    let output = merge(
        SourceSets {
            happiness: happiness.records,
            hdi: hdi.records,
            ..SourceSets::default()
        },
        &tables,
        &options,
    )
    .unwrap();

    let keys: Vec<_> = output
        .records
        .iter()
        .map(|merged| (merged.record.country.as_str(), merged.record.year))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Canada", 2018),
            ("Atlantis", 2018),
            ("United States of America", 2018),
            ("Canada", 2019),
            ("Atlantis", 2019),
        ]
    );
    // the second spelling of the same country in one year is reported, first kept
    assert_eq!(output.records[2].record.score, Some(6.9));
    // hdi and gdp are carried forward per country
    assert_eq!(output.records[3].record.hdi, Some(0.92));
    assert_eq!(output.records[3].record.gdp_per_capita, Some(1.3));
    assert_eq!(output.records[4].record.hdi, None);
    assert_eq!(output.records[1].record.country_code, None);

    let issues = ctx.into_issues();
    assert_eq!(issues.count(IssueKind::DuplicateKey), 1);
    assert!(
        issues.unresolved_names()[&SourceKind::Happiness].contains("Atlantis"),
        "unresolved names are collected per source"
    );
    // the long table has no rows for 2019-2024 once Atlantis is dropped
    assert!(issues.count(IssueKind::MissingSource) >= 6);
}

#[test]
fn sibling_geography_wins_over_lookup_across_report_shapes() {
    let tables = tables();
    let options = PipelineOptions::default();
    let mut ctx = LoadContext::new(&tables, &options);

    let happiness = load_source(
        &HappinessLoader,
        &[
            RawTable::yearly(
                2015,
                test_df(vec![
                    ("Country", vec!["India", "Nepal"]),
                    ("Region", vec!["Southern Asia", "Southern Asia"]),
                    ("Score", vec!["4.565", "4.514"]),
                ]),
                "2015_report.csv",
            ),
            RawTable::yearly(
                2023,
                test_df(vec![
                    ("Country", vec!["India", "Japan"]),
                    ("Continent", vec!["Asia", "Asia"]),
                    ("Score", vec!["4.036", "6.129"]),
                ]),
                "2023_report.csv",
            ),
        ],
        &mut ctx,
    );
    let output = merge(
        SourceSets {
            happiness: happiness.records,
            ..SourceSets::default()
        },
        &tables,
        &options,
    )
    .unwrap();

    let geography: Vec<_> = output
        .records
        .iter()
        .map(|merged| {
            (
                merged.record.country.as_str(),
                merged.record.year,
                merged.record.region.as_deref(),
                merged.record.continent.as_deref(),
            )
        })
        .collect();
    assert_eq!(
        geography,
        vec![
            ("India", 2015, Some("Southern Asia"), Some("Asia")),
            ("Nepal", 2015, Some("Southern Asia"), Some("Asia")),
            ("India", 2023, Some("Southern Asia"), Some("Asia")),
            ("Japan", 2023, Some("Eastern Asia"), Some("Asia")),
        ]
    );
    assert_eq!(output.stats.regions_backfilled, 1);
    assert_eq!(output.stats.continents_backfilled, 1);
    assert_eq!(output.stats.geography_derived, 2);
}
