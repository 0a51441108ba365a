//! Lenient accessors over untyped JSON values.
//!
//! Log records come from several pipeline versions and routinely omit fields, use `null`
//! placeholders, or encode lists as strings. Every helper here returns a default instead of
//! failing, so that a single odd record never aborts a batch.

use serde_json::Value;

/// Look up `key` in `container` when `container` is a JSON object.
///
/// Returns `None` (the default) when the container is absent, is not an object, or does not
/// contain the key. A key that is present with a `null` value yields `Some(&Value::Null)`.
#[must_use]
pub fn safe_get<'a>(container: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    container.and_then(Value::as_object).and_then(|map| map.get(key))
}

/// Like [`safe_get`], but substitutes `default` for a missing value.
#[must_use]
pub fn safe_get_or<'a>(container: Option<&'a Value>, key: &str, default: &'a Value) -> &'a Value {
    safe_get(container, key).unwrap_or(default)
}

/// Follow a chain of keys through nested objects.
#[must_use]
pub fn get_path<'a>(container: Option<&'a Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(container?, |current, key| safe_get(Some(current), key))
}

/// Read a JSON number as `f64`; anything else is treated as missing.
#[must_use]
pub fn to_float(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

/// Read a JSON string; anything else is treated as missing.
#[must_use]
pub fn to_text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

/// Decode a covariance-style numeric list.
///
/// - An array of numbers is taken as-is.
/// - A string such as `"[1.0, 2.5, 3]"` has one pair of enclosing brackets removed and is split
///   on commas. Decoding is all-or-nothing: one bad token discards the whole list.
/// - Any other value, including `null`, yields an empty list.
#[must_use]
pub fn to_numeric_list(value: Option<&Value>) -> Vec<f64> {
    match value {
        Some(Value::Array(items)) => {
            let parsed: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
            parsed.unwrap_or_else(|| {
                log::warn!("Failed to decode covariance: non-numeric entry in {value:?}");
                Vec::new()
            })
        }
        Some(Value::String(text)) => parse_numeric_list(text).unwrap_or_else(|| {
            log::warn!("Failed to decode covariance: {text}");
            Vec::new()
        }),
        _ => Vec::new(),
    }
}

/// Parse the textual form of a numeric list, returning `None` if any token is not a number.
#[must_use]
pub fn parse_numeric_list(text: &str) -> Option<Vec<f64>> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    if inner.trim().is_empty() {
        return Some(Vec::new());
    }

    inner.split(',').map(|token| token.trim().parse::<f64>().ok()).collect()
}

/// Interpret a success indicator.
///
/// `null` or absent is `false`, a boolean is itself, and a string is `true` only when it equals
/// `"true"` ignoring case. Every other string (`"1"`, `"yes"`, ...) and every other type is
/// `false`.
#[must_use]
pub fn to_boolean(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
