//! Integer fields as the upstream API actually sends them.
//!
//! Upstream numbers are plain JSON numbers, so an integer column may arrive as
//! `30` or as `30.0`. Both are accepted; a fractional value such as `2.5` is not
//! an integer and is rejected.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};

// 2^63: the first float above the i64 range.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Reads a JSON number as `i64` when it holds a whole value in range.
pub fn number_as_i64(number: &Number) -> Option<i64> {
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    let f = number.as_f64()?;
    if f.fract() == 0.0 && f >= -I64_BOUND && f < I64_BOUND {
        Some(f as i64)
    } else {
        None
    }
}

/// Like [`Value::as_i64`], but also accepts whole-number floats.
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number_as_i64(number),
        _ => None,
    }
}

/// `deserialize_with` helper for required integer fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number_as_i64(&number)
        .ok_or_else(|| de::Error::custom(format!("expected a whole number, found {}", number)))
}

/// `deserialize_with` helper for nullable integer fields.
///
/// Pair it with `#[serde(default)]` so a missing key still reads as `None`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Number>::deserialize(deserializer)? {
        Some(number) => number_as_i64(&number).map(Some).ok_or_else(|| {
            de::Error::custom(format!("expected a whole number, found {}", number))
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_as_i64() {
        assert_eq!(value_as_i64(&json!(5)), Some(5));
        assert_eq!(value_as_i64(&json!(5.0)), Some(5));
        assert_eq!(value_as_i64(&json!(-3.0)), Some(-3));
        assert_eq!(value_as_i64(&json!(2.5)), None);
        assert_eq!(value_as_i64(&json!(1.0e19)), None);
        assert_eq!(value_as_i64(&json!("5")), None);
        assert_eq!(value_as_i64(&json!(null)), None);
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "deserialize")]
        code: i64,
        #[serde(default, deserialize_with = "deserialize_option")]
        days: Option<i64>,
    }

    #[test]
    fn test_deserialize_whole_floats() {
        let sample: Sample = serde_json::from_value(json!({"code": 7.0, "days": 30.0})).unwrap();
        assert_eq!(sample.code, 7);
        assert_eq!(sample.days, Some(30));
    }

    #[test]
    fn test_deserialize_missing_and_null_option() {
        let missing: Sample = serde_json::from_value(json!({"code": 1})).unwrap();
        assert_eq!(missing.days, None);
        let null: Sample = serde_json::from_value(json!({"code": 1, "days": null})).unwrap();
        assert_eq!(null.days, None);
    }

    #[test]
    fn test_deserialize_rejects_fractions() {
        assert!(serde_json::from_value::<Sample>(json!({"code": 1.5})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"code": 1, "days": 0.5})).is_err());
    }
}
