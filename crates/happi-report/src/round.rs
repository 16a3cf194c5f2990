use serde_json::{Number, Value};

/// Rounds half away from zero to `decimals` places.
pub fn round_value(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}

/// Rounds every float in a serialized document in place.
///
/// Integers are left alone so years and counts keep their type.
pub fn round_json(value: &mut Value, decimals: u32) {
    match value {
        Value::Number(number) if number.is_f64() => {
            if let Some(rounded) = number
                .as_f64()
                .map(|float| round_value(float, decimals))
                .and_then(Number::from_f64)
            {
                *number = rounded;
            }
        }
        Value::Array(items) => {
            for item in items {
                round_json(item, decimals);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                round_json(item, decimals);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn rounds_nested_floats_only() {
        let mut doc = json!({
            "year": 2020,
            "score": 7.80871,
            "rows": [{"hdi": 0.95649}, {"hdi": null}],
        });
        round_json(&mut doc, 3);
        assert_eq!(
            doc,
            json!({"year": 2020, "score": 7.809, "rows": [{"hdi": 0.956}, {"hdi": null}]})
        );
    }

    fn decimal_places(text: &str) -> usize {
        text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
    }

    proptest! {
        #[test]
        fn serialized_floats_keep_at_most_three_decimals(value in -1.0e7f64..1.0e7f64) {
            let mut doc = json!({ "value": value });
            round_json(&mut doc, 3);
            let text = doc["value"].to_string();
            prop_assert!(!text.contains('e'), "unexpected exponent in {}", text);
            prop_assert!(decimal_places(&text) <= 3, "{} has too many decimals", text);
        }
    }
}
