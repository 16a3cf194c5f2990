//! Cell helpers for the string-typed frames produced by [`crate::read_csv_table`].

use polars::prelude::*;

/// Text of a cell; null reads as the empty string.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Integral value of a cell. `2019.0` counts as integral, `2019.5` does not.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match numeric_cell(value) {
        NumericCell::Value(v) if v.fract() == 0.0 && v.abs() < 1e15 => Some(v as i64),
        _ => None,
    }
}

/// A cell read from a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericCell {
    /// Null, empty or an explicit missing marker.
    Absent,
    Value(f64),
    /// Present but not a number; carries the raw text.
    Invalid(String),
}

const MISSING_MARKERS: [&str; 6] = ["", "na", "n/a", "nan", "null", "-"];

/// Classifies a cell as absent, a finite number, or malformed text.
pub fn numeric_cell(value: AnyValue<'_>) -> NumericCell {
    match value {
        AnyValue::Null => NumericCell::Absent,
        AnyValue::String(s) => parse_numeric_text(s),
        AnyValue::StringOwned(s) => parse_numeric_text(&s),
        other => match other.extract::<f64>() {
            Some(v) if v.is_finite() => NumericCell::Value(v),
            Some(_) => NumericCell::Absent,
            None => NumericCell::Invalid(other.to_string()),
        },
    }
}

fn parse_numeric_text(raw: &str) -> NumericCell {
    let trimmed = raw.trim();
    if MISSING_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return NumericCell::Absent;
    }
    let cleaned = if trimmed.contains(',') {
        match strip_thousands_separators(trimmed) {
            Some(cleaned) => cleaned,
            None => return NumericCell::Invalid(trimmed.to_string()),
        }
    } else {
        trimmed.to_string()
    };
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => NumericCell::Value(v),
        _ => NumericCell::Invalid(trimmed.to_string()),
    }
}

/// `1,234,567.8` becomes `1234567.8`. Commas anywhere else, such as the
/// decimal comma in `7,5`, make the text unreadable.
fn strip_thousands_separators(text: &str) -> Option<String> {
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };
    if fraction.is_some_and(|fraction| fraction.contains(',')) {
        return None;
    }
    let digits = integer.strip_prefix(['-', '+']).unwrap_or(integer);
    let mut groups = digits.split(',');
    let leading = groups.next()?;
    if leading.is_empty() || leading.len() > 3 {
        return None;
    }
    if !groups.all(|group| group.len() == 3 && group.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    Some(text.replace(',', ""))
}
