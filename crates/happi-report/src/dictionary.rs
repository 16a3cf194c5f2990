use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use happi_model::{PipelineOptions, SourceKind};
use serde::Serialize;

const FIELD_DEFINITIONS: [(&str, &str); 22] = [
    ("country", "Canonical country name, identical across all sources"),
    ("country_code", "ISO 3166-1 alpha-3 code; X-prefixed four-letter codes for continents"),
    ("year", "Observation year"),
    ("rank", "Position in the year's happiness ranking, 1 is happiest"),
    ("score", "Happiness (ladder) score on a 0-10 scale"),
    ("gdp_per_capita", "Contribution of GDP per capita to the score"),
    ("social_support", "Contribution of social support to the score"),
    ("life_expectancy", "Contribution of healthy life expectancy to the score"),
    ("freedom", "Contribution of freedom to make life choices to the score"),
    ("corruption", "Contribution of perceived corruption to the score"),
    ("generosity", "Contribution of generosity to the score"),
    ("dystopia_residual", "Unexplained component relative to a hypothetical dystopia"),
    ("region", "Regional classification from the happiness report"),
    ("continent", "Continent, taken from the source or derived from region"),
    ("hdi", "Human Development Index (0-1)"),
    ("development_category", "HDI bucket: Low, Medium, High, Very High"),
    ("population", "Total population in thousands"),
    ("pop_male", "Male population in thousands"),
    ("pop_female", "Female population in thousands"),
    ("population_density", "People per square kilometre"),
    ("population_category", "Population bucket: Very Small, Small, Medium, Large, Very Large"),
    ("weighted_score", "Score multiplied by population"),
];

const TRANSFORMATION_NOTES: [&str; 8] = [
    "Country name variants mapped to one canonical name through a static alias table",
    "Country codes attached from a static code table; unknown names keep an empty code",
    "Column headers harmonized across every report year",
    "Region and continent derived from each other and backfilled from the earliest year known",
    "Gaps filled forward then backward within each country",
    "Population grouped into 5 categories by size",
    "Development grouped into 4 categories by HDI",
    "Numeric values rounded after aggregation",
];

#[derive(Debug, Clone, Serialize)]
pub struct SourceDescription {
    pub name: &'static str,
    pub years: String,
    pub url: &'static str,
    pub description: &'static str,
}

/// Field definitions, source descriptions and transformation notes.
#[derive(Debug, Clone, Serialize)]
pub struct DataDictionary {
    pub generated_at: String,
    pub fields: BTreeMap<&'static str, &'static str>,
    pub sources: BTreeMap<SourceKind, SourceDescription>,
    pub transformation_notes: Vec<&'static str>,
}

pub fn data_dictionary(options: &PipelineOptions) -> DataDictionary {
    let years = format!("{}-{}", options.first_year, options.last_year);
    let sources = SourceKind::ALL
        .into_iter()
        .map(|source| {
            let (url, description) = match source {
                SourceKind::Happiness => (
                    "https://worldhappiness.report/",
                    "Annual survey of subjective well-being and its determinants",
                ),
                SourceKind::Hdi => (
                    "https://hdr.undp.org/data-center/human-development-index",
                    "Composite index of health, education and standard of living",
                ),
                SourceKind::Population => (
                    "https://population.un.org/wpp/",
                    "Population estimates and projections",
                ),
            };
            let entry = SourceDescription {
                name: source.label(),
                years: years.clone(),
                url,
                description,
            };
            (source, entry)
        })
        .collect();
    DataDictionary {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        fields: FIELD_DEFINITIONS.into_iter().collect(),
        sources,
        transformation_notes: TRANSFORMATION_NOTES.to_vec(),
    }
}
