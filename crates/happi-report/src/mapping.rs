use std::collections::{BTreeMap, BTreeSet};

use happi_model::{IssueLog, SourceKind};
use serde::Serialize;

/// Unresolved name stub for operators to complete in the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingStub {
    pub code: Option<String>,
    pub sources: BTreeSet<SourceKind>,
}

pub type UnresolvedNames = BTreeMap<String, MappingStub>;

/// Every name that reached the normalizer without a code, with the sources it came from.
pub fn unresolved_names(issues: &IssueLog) -> UnresolvedNames {
    let mut names = UnresolvedNames::new();
    for (source, set) in issues.unresolved_names() {
        for name in set {
            names
                .entry(name)
                .or_insert_with(|| MappingStub {
                    code: None,
                    sources: BTreeSet::new(),
                })
                .sources
                .insert(source);
        }
    }
    names
}
