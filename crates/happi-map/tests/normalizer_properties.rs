use std::collections::BTreeMap;
use std::sync::OnceLock;

use happi_map::NameNormalizer;
use happi_standards::{ReferenceTables, standards_root};
use proptest::prelude::*;

fn shipped() -> &'static ReferenceTables {
    static TABLES: OnceLock<ReferenceTables> = OnceLock::new();
    TABLES.get_or_init(|| ReferenceTables::load(&standards_root()).expect("load standards"))
}

fn known_names() -> Vec<String> {
    let tables = shipped();
    let mut names: Vec<String> = tables
        .aliases()
        .flat_map(|(variant, canonical)| [variant.to_string(), canonical.to_string()])
        .collect();
    names.extend(tables.code_entries().map(|entry| entry.name.clone()));
    names
}

#[test]
fn all_variants_of_a_name_share_one_code() {
    let tables = shipped();
    let normalizer = NameNormalizer::new(tables);
    let mut codes: BTreeMap<String, Option<String>> = BTreeMap::new();
    for (variant, canonical) in tables.aliases() {
        let resolved = normalizer.resolve(variant);
        assert_eq!(resolved.canonical, canonical);
        let previous = codes.entry(canonical.to_string()).or_insert(resolved.code.clone());
        assert_eq!(*previous, resolved.code, "variant {variant}");
        assert_eq!(resolved.code.as_deref(), normalizer.code(canonical));
    }
}

#[test]
fn us_spellings_merge() {
    let normalizer = NameNormalizer::new(shipped());
    assert_eq!(normalizer.normalize("US"), normalizer.normalize("USA"));
    assert_eq!(normalizer.code(&normalizer.normalize("US")), Some("USA"));
    assert_eq!(normalizer.normalize("Taiwan Province of China*"), "Taiwan");
}

proptest! {
    #[test]
    fn normalize_is_idempotent_for_arbitrary_text(raw in ".{0,40}") {
        let normalizer = NameNormalizer::new(shipped());
        let once = normalizer.normalize(&raw);
        prop_assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_for_known_names(
        index in 0usize..512,
        suffix in prop::sample::select(vec!["", "*", " *", "**", "  "]),
    ) {
        let names = known_names();
        let raw = format!("{}{}", names[index % names.len()], suffix);
        let normalizer = NameNormalizer::new(shipped());
        let once = normalizer.normalize(&raw);
        prop_assert_eq!(normalizer.normalize(&once), once.clone());
        prop_assert_eq!(normalizer.resolve(&raw).canonical, once);
    }
}
