use happi_standards::ReferenceTables;

/// Removes trailing footnote markers (`Chad*`, `Chad **`) and surrounding whitespace.
pub fn strip_footnotes(raw: &str) -> &str {
    raw.trim().trim_end_matches(|ch: char| ch == '*' || ch.is_whitespace())
}

/// A raw country string resolved to its canonical name and code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub canonical: String,
    pub code: Option<String>,
}

/// Alias and code lookups over the shared reference tables.
#[derive(Debug, Clone, Copy)]
pub struct NameNormalizer<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> NameNormalizer<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Canonical form of `raw`. Names without an alias pass through (minus footnotes).
    pub fn normalize(&self, raw: &str) -> String {
        let stripped = strip_footnotes(raw);
        self.tables
            .alias(stripped)
            .unwrap_or(stripped)
            .to_string()
    }

    /// Code for a canonical name; `None` when the name is not in the code table.
    pub fn code(&self, canonical: &str) -> Option<&'a str> {
        self.tables.code(canonical)
    }

    pub fn resolve(&self, raw: &str) -> ResolvedName {
        let canonical = self.normalize(raw);
        let code = self.code(&canonical).map(str::to_string);
        ResolvedName { canonical, code }
    }
}
