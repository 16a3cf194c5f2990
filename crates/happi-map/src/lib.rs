//! Maps source-specific spellings onto canonical country names and field names.

pub mod harmonize;
pub mod normalize;

pub use harmonize::{ColumnHarmonizer, HeaderMapping, RenameMap};
pub use normalize::{NameNormalizer, ResolvedName, strip_footnotes};
