use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Input dataset families merged by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Happiness,
    Hdi,
    Population,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [Self::Happiness, Self::Hdi, Self::Population];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happiness => "happiness",
            Self::Hdi => "hdi",
            Self::Population => "population",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Happiness => "World Happiness Report",
            Self::Hdi => "Human Development Index",
            Self::Population => "UN World Population Prospects",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happiness" => Ok(Self::Happiness),
            "hdi" => Ok(Self::Hdi),
            "population" => Ok(Self::Population),
            other => Err(format!("unknown source: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("HDI".parse::<SourceKind>(), Ok(SourceKind::Hdi));
        assert_eq!(" population ".parse::<SourceKind>(), Ok(SourceKind::Population));
        assert!("census".parse::<SourceKind>().is_err());
    }
}
