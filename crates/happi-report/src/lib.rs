//! Export fan-out for the merged record set.
//!
//! - **Views**: full dump, time series, country directory, continental and
//!   global aggregates, population-category breakdown, completeness
//! - **Correlations**: pairwise-complete Pearson matrix over the well-being fields
//! - **Writers**: JSON and CSV files plus a sha256 manifest
//! - **Validation**: the post-run data quality summary

mod aggregate;
mod correlation;
mod dictionary;
mod mapping;
mod round;
mod validation;
mod views;
mod writer;

pub use correlation::{CorrelationMatrix, correlation_matrix, pearson};
pub use dictionary::{DataDictionary, SourceDescription, data_dictionary};
pub use mapping::{MappingStub, UnresolvedNames, unresolved_names};
pub use round::{round_json, round_value};
pub use validation::{
    OUTLIER_HIGH, OUTLIER_LOW, ValidationSummary, YearCoverage, validation_summary,
};
pub use views::{
    CategoryRow, CompletenessRow, ContinentRow, CountrySnapshot, ExportViews, TrendRow,
};
pub use writer::{Manifest, ManifestEntry, OutputFile, write_outputs};
