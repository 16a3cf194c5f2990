//! Reference tables that drive name reconciliation and header harmonization.
//!
//! Tables are plain CSV files under `standards/` so that a new data vintage
//! is handled by adding rows, never by changing lookup code.

pub mod csv_utils;
pub mod error;
pub mod hash;
pub mod paths;
pub mod tables;
pub mod text;

pub use error::{Result, StandardsError};
pub use paths::{STANDARDS_ENV_VAR, standards_root};
pub use tables::{CountryCodeEntry, CountryKind, ReferenceTables, ReferenceTablesBuilder};
pub use text::normalize_text;
