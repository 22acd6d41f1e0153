//! Serde helpers for loosely-typed numeric fields.
//!
//! Metric values and order numbers show up as numbers, numeric strings,
//! empty strings or null depending on the endpoint.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Bool(bool),
}

/// Interprets a JSON value as a number the way the API intends it.
#[must_use]
pub fn as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => parse_str(s),
        _ => None,
    }
}

fn parse_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Deserializes a number, numeric string or null into `Option<f64>`.
///
/// Non-numeric strings become `None` rather than failing the whole record.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNumber::Number(n)) => Some(n),
        Some(RawNumber::Text(s)) => parse_str(&s),
        Some(RawNumber::Bool(_)) | None => None,
    })
}

/// Deserializes a loosely encoded flag (`true`, `1`, `"1"`, ...) into a bool.
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNumber::Bool(b)) => b,
        Some(RawNumber::Number(n)) => n != 0.0,
        Some(RawNumber::Text(s)) => !(s.is_empty() || s == "0"),
        None => false,
    })
}

/// Deserializes `null` as the type's default, for collections the API
/// sometimes sends as `null` instead of omitting.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
