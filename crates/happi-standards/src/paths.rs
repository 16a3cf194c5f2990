use std::path::PathBuf;

/// Points the loader at a reference table directory other than the shipped one.
pub const STANDARDS_ENV_VAR: &str = "HAPPISCOPE_STANDARDS_DIR";

/// Fallback reference table directory: `$HAPPISCOPE_STANDARDS_DIR` when set and
/// non-empty, else the `standards/` directory at the workspace root.
///
/// Flag and config values take precedence; callers apply them before falling back here.
pub fn standards_root() -> PathBuf {
    std::env::var_os(STANDARDS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            [env!("CARGO_MANIFEST_DIR"), "..", "..", "standards"]
                .iter()
                .collect()
        })
}
