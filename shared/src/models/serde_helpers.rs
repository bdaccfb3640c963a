//! Serde helpers for content stored by older front-end builds
//!
//! Ids were historically written either as JSON numbers or as numeric
//! strings (`"1700000000000"`). Everything is normalized to `i64` here, at
//! the storage boundary, so the rest of the crate only ever sees integers.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Parse a legacy string id the way the front end did: optional sign, then
/// leading digits; anything after the digits is ignored.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}

/// Normalize a JSON id value (number or numeric string) to `i64`
pub fn normalize_id(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        serde_json::Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

/// An id that accepts either a JSON number or a numeric string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlexibleId(pub i64);

impl<'de> Deserialize<'de> for FlexibleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlexibleVisitor;

        impl<'de> Visitor<'de> for FlexibleVisitor {
            type Value = FlexibleId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer id or a numeric string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(FlexibleId)
                    .map_err(|_| de::Error::custom(format!("id out of range: {}", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                    Ok(FlexibleId(value as i64))
                } else {
                    Err(de::Error::custom(format!("invalid id: {}", value)))
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_leading_int(value)
                    .map(FlexibleId)
                    .ok_or_else(|| de::Error::custom(format!("invalid id: {}", value)))
            }
        }

        deserializer.deserialize_any(FlexibleVisitor)
    }
}

/// `deserialize_with` adapter for `id: i64` fields
pub fn flexible_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    FlexibleId::deserialize(deserializer).map(|id| id.0)
}

/// Deserialize an explicitly-nullable patch field.
///
/// Absent → `None` (via `#[serde(default)]`), `null` → `Some(None)`,
/// value → `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "flexible_id")]
        id: i64,
    }

    #[test]
    fn test_flexible_id_accepts_number_and_string() {
        let a: WithId = serde_json::from_value(json!({"id": 12})).unwrap();
        let b: WithId = serde_json::from_value(json!({"id": "12"})).unwrap();
        let c: WithId = serde_json::from_value(json!({"id": 1700000000000_i64})).unwrap();
        assert_eq!(a.id, 12);
        assert_eq!(b.id, 12);
        assert_eq!(c.id, 1_700_000_000_000);
    }

    #[test]
    fn test_flexible_id_rejects_garbage() {
        assert!(serde_json::from_value::<WithId>(json!({"id": "abc"})).is_err());
        assert!(serde_json::from_value::<WithId>(json!({"id": 1.5})).is_err());
        assert!(serde_json::from_value::<WithId>(json!({"id": null})).is_err());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int(" 42 "), Some(42));
        assert_eq!(parse_leading_int("42abc"), Some(42));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id(&json!(5)), Some(5));
        assert_eq!(normalize_id(&json!("5")), Some(5));
        assert_eq!(normalize_id(&json!(5.0)), Some(5));
        assert_eq!(normalize_id(&json!(true)), None);
    }

    #[test]
    fn test_double_option() {
        #[derive(Deserialize)]
        struct Patch {
            #[serde(default, deserialize_with = "double_option")]
            price: Option<Option<f64>>,
        }

        let absent: Patch = serde_json::from_value(json!({})).unwrap();
        let null: Patch = serde_json::from_value(json!({"price": null})).unwrap();
        let value: Patch = serde_json::from_value(json!({"price": 9.5})).unwrap();
        assert_eq!(absent.price, None);
        assert_eq!(null.price, Some(None));
        assert_eq!(value.price, Some(Some(9.5)));
    }
}
