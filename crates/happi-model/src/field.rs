//! Canonical field names shared by every source after header harmonization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::CanonicalRecord;

/// Real-valued fields of a [`CanonicalRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Score,
    GdpPerCapita,
    SocialSupport,
    LifeExpectancy,
    Freedom,
    Corruption,
    Generosity,
    DystopiaResidual,
    Hdi,
    Population,
    PopMale,
    PopFemale,
    PopulationDensity,
}

impl Metric {
    pub const ALL: [Metric; 13] = [
        Self::Score,
        Self::GdpPerCapita,
        Self::SocialSupport,
        Self::LifeExpectancy,
        Self::Freedom,
        Self::Corruption,
        Self::Generosity,
        Self::DystopiaResidual,
        Self::Hdi,
        Self::Population,
        Self::PopMale,
        Self::PopFemale,
        Self::PopulationDensity,
    ];

    /// Score, the six explanatory factors and hdi: the fields averaged and correlated on export.
    pub const WELLBEING: [Metric; 8] = [
        Self::Score,
        Self::GdpPerCapita,
        Self::SocialSupport,
        Self::LifeExpectancy,
        Self::Freedom,
        Self::Corruption,
        Self::Generosity,
        Self::Hdi,
    ];

    /// Fields gap-filled per country unless configured otherwise.
    pub const GAP_FILL_DEFAULT: [Metric; 8] = [
        Self::GdpPerCapita,
        Self::SocialSupport,
        Self::LifeExpectancy,
        Self::Freedom,
        Self::Corruption,
        Self::Generosity,
        Self::Hdi,
        Self::Population,
    ];

    /// A row counts as complete when all of these are present.
    pub const CORE: [Metric; 4] = [
        Self::Score,
        Self::GdpPerCapita,
        Self::SocialSupport,
        Self::Freedom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::GdpPerCapita => "gdp_per_capita",
            Self::SocialSupport => "social_support",
            Self::LifeExpectancy => "life_expectancy",
            Self::Freedom => "freedom",
            Self::Corruption => "corruption",
            Self::Generosity => "generosity",
            Self::DystopiaResidual => "dystopia_residual",
            Self::Hdi => "hdi",
            Self::Population => "population",
            Self::PopMale => "pop_male",
            Self::PopFemale => "pop_female",
            Self::PopulationDensity => "population_density",
        }
    }

    /// Population counts and density cannot be negative.
    pub fn is_non_negative(self) -> bool {
        matches!(
            self,
            Self::Population | Self::PopMale | Self::PopFemale | Self::PopulationDensity
        )
    }

    pub fn get(self, record: &CanonicalRecord) -> Option<f64> {
        match self {
            Self::Score => record.score,
            Self::GdpPerCapita => record.gdp_per_capita,
            Self::SocialSupport => record.social_support,
            Self::LifeExpectancy => record.life_expectancy,
            Self::Freedom => record.freedom,
            Self::Corruption => record.corruption,
            Self::Generosity => record.generosity,
            Self::DystopiaResidual => record.dystopia_residual,
            Self::Hdi => record.hdi,
            Self::Population => record.population,
            Self::PopMale => record.pop_male,
            Self::PopFemale => record.pop_female,
            Self::PopulationDensity => record.population_density,
        }
    }

    pub fn slot_mut(self, record: &mut CanonicalRecord) -> &mut Option<f64> {
        match self {
            Self::Score => &mut record.score,
            Self::GdpPerCapita => &mut record.gdp_per_capita,
            Self::SocialSupport => &mut record.social_support,
            Self::LifeExpectancy => &mut record.life_expectancy,
            Self::Freedom => &mut record.freedom,
            Self::Corruption => &mut record.corruption,
            Self::Generosity => &mut record.generosity,
            Self::DystopiaResidual => &mut record.dystopia_residual,
            Self::Hdi => &mut record.hdi,
            Self::Population => &mut record.population,
            Self::PopMale => &mut record.pop_male,
            Self::PopFemale => &mut record.pop_female,
            Self::PopulationDensity => &mut record.population_density,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| format!("unknown metric: {key}"))
    }
}

/// Target of a column rename: either a metric or one of the descriptive fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    Country,
    Year,
    Rank,
    Region,
    Continent,
    /// Population-source discriminator between countries and regional aggregates.
    LocationType,
    Metric(Metric),
}

impl CanonicalField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Year => "year",
            Self::Rank => "rank",
            Self::Region => "region",
            Self::Continent => "continent",
            Self::LocationType => "location_type",
            Self::Metric(metric) => metric.as_str(),
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "country" => Ok(Self::Country),
            "year" => Ok(Self::Year),
            "rank" => Ok(Self::Rank),
            "region" => Ok(Self::Region),
            "continent" => Ok(Self::Continent),
            "location_type" => Ok(Self::LocationType),
            other => other
                .parse::<Metric>()
                .map(Self::Metric)
                .map_err(|_| format!("unknown canonical field: {other}")),
        }
    }
}
