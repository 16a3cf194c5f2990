//! Ordinal buckets derived from population and hdi.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Population size bucket. Thresholds are in thousands and right-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PopulationCategory {
    #[serde(rename = "Very Small")]
    VerySmall,
    #[serde(rename = "Small")]
    Small,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Large")]
    Large,
    #[serde(rename = "Very Large")]
    VeryLarge,
}

impl PopulationCategory {
    pub const ALL: [PopulationCategory; 5] = [
        Self::VerySmall,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::VeryLarge,
    ];

    /// `population` is in thousands.
    pub fn from_population(population: f64) -> Option<Self> {
        if !population.is_finite() || population < 0.0 {
            return None;
        }
        let category = if population <= 10_000.0 {
            Self::VerySmall
        } else if population <= 50_000.0 {
            Self::Small
        } else if population <= 100_000.0 {
            Self::Medium
        } else if population <= 500_000.0 {
            Self::Large
        } else {
            Self::VeryLarge
        };
        Some(category)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VerySmall => "Very Small",
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::VeryLarge => "Very Large",
        }
    }
}

impl fmt::Display for PopulationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human development bucket keyed on hdi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DevelopmentCategory {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl DevelopmentCategory {
    pub fn from_hdi(hdi: f64) -> Option<Self> {
        if !hdi.is_finite() {
            return None;
        }
        let category = if hdi <= 0.55 {
            Self::Low
        } else if hdi <= 0.7 {
            Self::Medium
        } else if hdi <= 0.8 {
            Self::High
        } else {
            Self::VeryHigh
        };
        Some(category)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for DevelopmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
