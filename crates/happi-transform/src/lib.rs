//! Transforms applied to canonical records between loading and export.

pub mod derive;
pub mod gap_fill;
pub mod geography;
pub mod rank;

pub use derive::enrich;
pub use gap_fill::{forward_backward_fill, gap_fill};
pub use geography::{GeographyField, backfill_from_siblings, derive_geography};
pub use rank::assign_ranks;
