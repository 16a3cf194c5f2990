//! Reads the raw yearly source tables into polars frames.

pub mod csv;
pub mod discovery;
pub mod error;
pub mod polars_utils;

pub use csv::{read_csv_table, validate_encoding};
pub use discovery::{DataLayout, DiscoveredFiles, discover_files};
pub use error::{IngestError, Result};
pub use polars_utils::{NumericCell, any_to_i64, any_to_string, numeric_cell};
