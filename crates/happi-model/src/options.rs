use std::ops::RangeInclusive;

use crate::error::{PipelineError, Result};
use crate::field::Metric;

/// Earliest year any source is read for.
pub const MIN_YEAR: i32 = 2015;
/// Latest year any source is read for.
pub const MAX_YEAR: i32 = 2024;

/// Options controlling a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub first_year: i32,
    pub last_year: i32,
    /// Decimal places kept in exported numbers.
    pub decimals: u32,
    /// Fields filled forward then backward per country.
    pub gap_fill_fields: Vec<Metric>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            first_year: MIN_YEAR,
            last_year: MAX_YEAR,
            decimals: 3,
            gap_fill_fields: Metric::GAP_FILL_DEFAULT.to_vec(),
        }
    }
}

impl PipelineOptions {
    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    /// Rejects ranges outside the supported window and rounding precision that f64 cannot carry.
    pub fn validate(&self) -> Result<()> {
        if self.first_year > self.last_year
            || self.first_year < MIN_YEAR
            || self.last_year > MAX_YEAR
        {
            return Err(PipelineError::InvalidYearRange {
                first: self.first_year,
                last: self.last_year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }
        if self.decimals > 12 {
            return Err(PipelineError::InvalidOption(format!(
                "decimals must be at most 12, got {}",
                self.decimals
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_full_window() {
        let options = PipelineOptions::default();
        assert_eq!(options.years(), 2015..=2024);
        assert_eq!(options.decimals, 3);
        assert!(!options.gap_fill_fields.contains(&Metric::Score));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_ranges_outside_window() {
        let options = PipelineOptions {
            first_year: 2014,
            ..PipelineOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(PipelineError::InvalidYearRange { first: 2014, .. })
        ));
        let options = PipelineOptions {
            first_year: 2020,
            last_year: 2019,
            ..PipelineOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
