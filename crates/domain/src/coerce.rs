//! Integer coercion for loosely-typed character records.
//!
//! Character data arrives from a host that stores numbers as whatever the
//! user typed: numeric strings, floats, `null`, or nothing at all. Every
//! numeric input in this crate goes through [`to_int`] so malformed values
//! degrade to `0` instead of failing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Convert an arbitrary JSON value to an integer.
///
/// Finite numbers and numeric strings are truncated toward zero. Strings
/// may also use an unsigned `0x`, `0o` or `0b` prefix. Booleans count as
/// `1`/`0`. Anything else (objects, arrays, `null`, non-numeric or
/// non-finite strings) yields `0`.
pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(i64::MAX)
            } else {
                n.as_f64().map(truncate).unwrap_or(0)
            }
        }
        Value::String(s) => parse_numeric(s),
        Value::Bool(b) => i64::from(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

fn parse_numeric(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }
    trimmed.parse::<f64>().map(truncate).unwrap_or(0)
}

/// `0x1F`, `0o17`, `0b101` (case-insensitive prefix, no sign). Malformed
/// digits yield `0`; oversized values saturate.
fn parse_radix_literal(raw: &str) -> Option<i64> {
    let prefix = raw.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &raw[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(0);
    }
    Some(digits.chars().fold(0_i64, |acc, c| {
        let digit = i64::from(c.to_digit(radix).unwrap_or(0));
        acc.saturating_mul(i64::from(radix)).saturating_add(digit)
    }))
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() {
        // `as` saturates at the i64 bounds
        f.trunc() as i64
    } else {
        0
    }
}

/// Serde helper: deserialize any JSON value as an integer via [`to_int`].
pub fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(to_int(&value))
}

/// Serde helper: `null` stays `None`, anything else is coerced via [`to_int`].
pub fn lenient_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(to_int(&other)),
    })
}

/// Serde helper: only a literal JSON `true` counts as set.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Serde helper: a value that does not fit `T` falls back to `T::default()`.
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
