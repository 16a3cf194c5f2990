//! Loading and merging of the three canonical source sets.

pub mod context;
pub mod frame;
pub mod ingest;
pub mod loaders;
pub mod merge;

pub use context::LoadContext;
pub use ingest::{SourceTables, read_sources};
pub use loaders::{
    HappinessLoader, HdiLoader, LoaderRegistry, PopulationLoader, RawTable, SourceLoad,
    SourceLoader, default_registry, load_source,
};
pub use merge::{MergeOutput, MergeStats, SourceSets, merge};
