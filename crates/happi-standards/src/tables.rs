//! The immutable reference-table registry.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use happi_model::{CanonicalField, SourceKind};
use tracing::debug;

use crate::csv_utils::{Row, get_optional, parse_csv_rows, require_field};
use crate::error::{Result, StandardsError};
use crate::hash::sha256_hex;
use crate::text::normalize_text;

pub const COUNTRY_ALIASES_FILE: &str = "country_aliases.csv";
pub const COUNTRY_CODES_FILE: &str = "country_codes.csv";
pub const COLUMN_ALIASES_FILE: &str = "column_aliases.csv";
pub const REGION_CONTINENTS_FILE: &str = "region_continents.csv";
pub const CONTINENT_REGIONS_FILE: &str = "continent_regions.csv";
pub const AGGREGATE_LABELS_FILE: &str = "aggregate_labels.csv";

/// What a code-table entry identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CountryKind {
    Country,
    Territory,
    /// Continent or region; codes live in the reserved `X???` namespace.
    Region,
}

impl CountryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Territory => "territory",
            Self::Region => "region",
        }
    }

    fn code_is_valid(self, code: &str) -> bool {
        let upper = code.bytes().all(|b| b.is_ascii_uppercase());
        match self {
            Self::Country | Self::Territory => upper && code.len() == 3,
            Self::Region => upper && code.len() == 4 && code.starts_with('X'),
        }
    }
}

impl fmt::Display for CountryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "country" => Ok(Self::Country),
            "territory" => Ok(Self::Territory),
            "region" | "continent" => Ok(Self::Region),
            other => Err(format!("unknown kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCodeEntry {
    pub name: String,
    pub code: String,
    pub kind: CountryKind,
}

/// Every static lookup the pipeline needs, loaded once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    aliases: BTreeMap<String, String>,
    codes: BTreeMap<String, CountryCodeEntry>,
    columns: BTreeMap<SourceKind, BTreeMap<String, CanonicalField>>,
    region_continents: BTreeMap<String, String>,
    continent_regions: BTreeMap<String, String>,
    aggregate_labels: Vec<String>,
    fingerprint: Option<String>,
}

impl ReferenceTables {
    pub fn builder() -> ReferenceTablesBuilder {
        ReferenceTablesBuilder::default()
    }

    /// Loads every table from `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let mut builder = Self::builder();
        let mut digests = Vec::new();

        let (rows, path, digest) = read_table(root, COUNTRY_ALIASES_FILE)?;
        digests.push(digest);
        for row in &rows {
            builder = builder.alias(
                require_field(row, "variant", &path)?,
                require_field(row, "canonical", &path)?,
            );
        }

        let (rows, path, digest) = read_table(root, COUNTRY_CODES_FILE)?;
        digests.push(digest);
        for row in &rows {
            let kind_value = get_optional(row, "kind").unwrap_or("country");
            let kind = kind_value
                .parse::<CountryKind>()
                .map_err(|message| StandardsError::InvalidValue {
                    table: COUNTRY_CODES_FILE,
                    value: kind_value.to_string(),
                    message,
                })?;
            builder = builder.code(
                require_field(row, "name", &path)?,
                require_field(row, "code", &path)?,
                kind,
            );
        }

        let (rows, path, digest) = read_table(root, COLUMN_ALIASES_FILE)?;
        digests.push(digest);
        for row in &rows {
            let source = parse_source(require_field(row, "source", &path)?)?;
            let field = parse_field(require_field(row, "field", &path)?)?;
            builder = builder.column(source, require_field(row, "header", &path)?, field);
        }

        let (rows, path, digest) = read_table(root, REGION_CONTINENTS_FILE)?;
        digests.push(digest);
        for row in &rows {
            builder = builder.region_continent(
                require_field(row, "region", &path)?,
                require_field(row, "continent", &path)?,
            );
        }

        let (rows, path, digest) = read_table(root, CONTINENT_REGIONS_FILE)?;
        digests.push(digest);
        for row in &rows {
            builder = builder.continent_region(
                require_field(row, "continent", &path)?,
                require_field(row, "region", &path)?,
            );
        }

        let (rows, path, digest) = read_table(root, AGGREGATE_LABELS_FILE)?;
        digests.push(digest);
        for row in &rows {
            builder = builder.aggregate_label(require_field(row, "pattern", &path)?);
        }

        let mut tables = builder.build()?;
        tables.fingerprint = Some(sha256_hex(digests.join("\n").as_bytes()));
        debug!(
            root = %root.display(),
            aliases = tables.aliases.len(),
            codes = tables.codes.len(),
            aggregate_labels = tables.aggregate_labels.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }

    /// Canonical name for an alias variant, if the variant is known.
    pub fn alias(&self, variant: &str) -> Option<&str> {
        self.aliases.get(variant).map(String::as_str)
    }

    pub fn code(&self, canonical: &str) -> Option<&str> {
        self.codes.get(canonical).map(|entry| entry.code.as_str())
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(variant, canonical)| (variant.as_str(), canonical.as_str()))
    }

    /// Code entries sorted by name.
    pub fn code_entries(&self) -> impl Iterator<Item = &CountryCodeEntry> {
        self.codes.values()
    }

    /// Canonical field for a raw header of `source`, looked up by its normalized text.
    pub fn column_field(&self, source: SourceKind, header: &str) -> Option<CanonicalField> {
        self.columns
            .get(&source)
            .and_then(|headers| headers.get(&normalize_text(header)))
            .copied()
    }

    pub fn continent_for_region(&self, region: &str) -> Option<&str> {
        self.region_continents.get(region.trim()).map(String::as_str)
    }

    pub fn region_for_continent(&self, continent: &str) -> Option<&str> {
        self.continent_regions
            .get(continent.trim())
            .map(String::as_str)
    }

    pub fn aggregate_labels(&self) -> &[String] {
        &self.aggregate_labels
    }

    /// True when `name` contains any aggregate label, ignoring case.
    pub fn is_aggregate_label(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.aggregate_labels
            .iter()
            .any(|label| lowered.contains(&label.to_lowercase()))
    }

    /// Digest of the table files this registry was loaded from.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }
}

/// Collects table entries and validates them as a whole in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ReferenceTablesBuilder {
    aliases: Vec<(String, String)>,
    codes: Vec<(String, String, CountryKind)>,
    columns: Vec<(SourceKind, String, CanonicalField)>,
    region_continents: Vec<(String, String)>,
    continent_regions: Vec<(String, String)>,
    aggregate_labels: Vec<String>,
}

impl ReferenceTablesBuilder {
    #[must_use]
    pub fn alias(mut self, variant: &str, canonical: &str) -> Self {
        self.aliases
            .push((variant.trim().to_string(), canonical.trim().to_string()));
        self
    }

    #[must_use]
    pub fn code(mut self, name: &str, code: &str, kind: CountryKind) -> Self {
        self.codes
            .push((name.trim().to_string(), code.trim().to_string(), kind));
        self
    }

    #[must_use]
    pub fn column(mut self, source: SourceKind, header: &str, field: CanonicalField) -> Self {
        self.columns.push((source, header.to_string(), field));
        self
    }

    #[must_use]
    pub fn region_continent(mut self, region: &str, continent: &str) -> Self {
        self.region_continents
            .push((region.trim().to_string(), continent.trim().to_string()));
        self
    }

    #[must_use]
    pub fn continent_region(mut self, continent: &str, region: &str) -> Self {
        self.continent_regions
            .push((continent.trim().to_string(), region.trim().to_string()));
        self
    }

    #[must_use]
    pub fn aggregate_label(mut self, pattern: &str) -> Self {
        self.aggregate_labels.push(pattern.trim().to_string());
        self
    }

    pub fn build(self) -> Result<ReferenceTables> {
        let mut aliases = BTreeMap::new();
        for (variant, canonical) in self.aliases {
            if variant == canonical {
                continue;
            }
            if canonical.is_empty() || canonical.ends_with('*') {
                return Err(StandardsError::InvalidValue {
                    table: COUNTRY_ALIASES_FILE,
                    value: canonical,
                    message: "canonical names cannot be empty or end in a footnote marker"
                        .to_string(),
                });
            }
            if aliases.insert(variant.clone(), canonical).is_some() {
                return Err(StandardsError::DuplicateEntry {
                    table: COUNTRY_ALIASES_FILE,
                    key: variant,
                });
            }
        }
        // A canonical name that is also a variant would make normalization non-idempotent.
        for (variant, canonical) in &aliases {
            if aliases.contains_key(canonical) {
                return Err(StandardsError::AliasChain {
                    variant: variant.clone(),
                    canonical: canonical.clone(),
                });
            }
        }

        let mut codes = BTreeMap::new();
        for (name, code, kind) in self.codes {
            if !kind.code_is_valid(&code) {
                return Err(StandardsError::InvalidCode {
                    name,
                    code,
                    kind: kind.to_string(),
                });
            }
            if codes.contains_key(&name) {
                return Err(StandardsError::DuplicateEntry {
                    table: COUNTRY_CODES_FILE,
                    key: name,
                });
            }
            codes.insert(name.clone(), CountryCodeEntry { name, code, kind });
        }

        let mut columns: BTreeMap<SourceKind, BTreeMap<String, CanonicalField>> = BTreeMap::new();
        for (source, header, field) in self.columns {
            let key = normalize_text(&header);
            let headers = columns.entry(source).or_default();
            match headers.get(&key) {
                Some(existing) if *existing != field => {
                    return Err(StandardsError::ConflictingHeader {
                        source_name: source.to_string(),
                        header,
                        first: existing.to_string(),
                        second: field.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    headers.insert(key, field);
                }
            }
        }

        let region_continents = unique_pairs(self.region_continents, REGION_CONTINENTS_FILE)?;
        let continent_regions = unique_pairs(self.continent_regions, CONTINENT_REGIONS_FILE)?;

        let mut seen = BTreeSet::new();
        let mut aggregate_labels = Vec::new();
        for label in self.aggregate_labels {
            if label.is_empty() {
                continue;
            }
            if seen.insert(label.to_lowercase()) {
                aggregate_labels.push(label);
            }
        }

        Ok(ReferenceTables {
            aliases,
            codes,
            columns,
            region_continents,
            continent_regions,
            aggregate_labels,
            fingerprint: None,
        })
    }
}

fn unique_pairs(
    pairs: Vec<(String, String)>,
    table: &'static str,
) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for (key, value) in pairs {
        if map.insert(key.clone(), value).is_some() {
            return Err(StandardsError::DuplicateEntry { table, key });
        }
    }
    Ok(map)
}

fn read_table(root: &Path, file: &str) -> Result<(Vec<Row>, std::path::PathBuf, String)> {
    let path = root.join(file);
    let bytes = std::fs::read(&path).map_err(|err| StandardsError::io(&path, err))?;
    let digest = sha256_hex(&bytes);
    let rows = parse_csv_rows(&path, &bytes)?;
    Ok((rows, path, digest))
}

fn parse_source(value: &str) -> Result<SourceKind> {
    value
        .parse::<SourceKind>()
        .map_err(|message| StandardsError::InvalidValue {
            table: COLUMN_ALIASES_FILE,
            value: value.to_string(),
            message,
        })
}

fn parse_field(value: &str) -> Result<CanonicalField> {
    value
        .parse::<CanonicalField>()
        .map_err(|message| StandardsError::InvalidValue {
            table: COLUMN_ALIASES_FILE,
            value: value.to_string(),
            message,
        })
}
