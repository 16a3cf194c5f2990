//! Source loader trait and registry.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use happi_model::{CanonicalRecord, SourceKind};

use super::{HappinessLoader, HdiLoader, PopulationLoader, RawTable};
use crate::context::LoadContext;

/// Converts raw tables of one source into canonical records.
///
/// Loaders never fail: anything that cannot be interpreted is recorded on the
/// context as an issue and the affected rows or tables are skipped.
pub trait SourceLoader: Send + Sync {
    fn source(&self) -> SourceKind;

    fn description(&self) -> &'static str {
        "Source loader"
    }

    /// True when the source ships as one table with a year column instead of one file per year.
    fn long_format(&self) -> bool {
        false
    }

    fn load_table(&self, table: &RawTable, ctx: &mut LoadContext<'_>) -> Vec<CanonicalRecord>;
}

/// Loaders keyed by source.
pub struct LoaderRegistry {
    loaders: BTreeMap<SourceKind, Box<dyn SourceLoader>>,
}

impl LoaderRegistry {
    pub fn empty() -> Self {
        Self {
            loaders: BTreeMap::new(),
        }
    }

    /// Registers a loader, replacing any loader for the same source.
    pub fn register(&mut self, loader: Box<dyn SourceLoader>) {
        self.loaders.insert(loader.source(), loader);
    }

    pub fn get(&self, source: SourceKind) -> Option<&dyn SourceLoader> {
        self.loaders.get(&source).map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = SourceKind> + '_ {
        self.loaders.keys().copied()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(HappinessLoader));
        registry.register(Box::new(HdiLoader));
        registry.register(Box::new(PopulationLoader));
        registry
    }
}

static DEFAULT_REGISTRY: OnceLock<LoaderRegistry> = OnceLock::new();

/// Registry with the happiness, development-index and population loaders.
pub fn default_registry() -> &'static LoaderRegistry {
    DEFAULT_REGISTRY.get_or_init(LoaderRegistry::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_source() {
        let registry = default_registry();
        assert_eq!(registry.len(), 3);
        for source in SourceKind::ALL {
            let loader = registry.get(source).expect("loader registered");
            assert_eq!(loader.source(), source);
        }
        assert!(registry.get(SourceKind::Hdi).unwrap().long_format());
        assert!(!registry.get(SourceKind::Population).unwrap().long_format());
    }
}
