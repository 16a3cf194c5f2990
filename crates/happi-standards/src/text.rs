/// Normalizes a header for lookup: lowercase, separators as spaces, collapsed whitespace.
///
/// `Happiness.Score`, `happiness_score` and ` Happiness  Score ` all map to `happiness score`.
pub fn normalize_text(value: &str) -> String {
    let lowered = value.trim_matches('\u{feff}').to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|ch| match ch {
            '_' | '-' | '.' | '/' | '\\' => ' ',
            other => other,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_collapse() {
        assert_eq!(normalize_text("Happiness.Score"), "happiness score");
        assert_eq!(normalize_text("happiness_score"), "happiness score");
        assert_eq!(normalize_text("\u{feff}Country  name "), "country name");
        assert_eq!(
            normalize_text("Economy..GDP.per.Capita."),
            "economy gdp per capita"
        );
        assert_eq!(
            normalize_text("Explained by: Dystopia + residual"),
            "explained by: dystopia + residual"
        );
    }
}
