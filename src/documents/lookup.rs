//! Defensive lookups into model-produced JSON.
//!
//! Nothing about the documents' inner shape is guaranteed, so every read
//! goes through these helpers and falls back to a default instead of failing.

use serde_json::Value;

/// Placeholder printed for missing values
pub const NOT_AVAILABLE: &str = "N/A";

/// Walk `path` through nested objects
#[must_use]
pub fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Render a scalar for display; `None` and `null` become `default`
#[must_use]
pub fn display_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => if *b { "True" } else { "False" }.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Render the value at `path`, or `N/A`
#[must_use]
pub fn text(value: &Value, path: &[&str]) -> String {
    display_or(at(value, path), NOT_AVAILABLE)
}

/// Render the value at `path`, or `default`
#[must_use]
pub fn text_or(value: &Value, path: &[&str], default: &str) -> String {
    display_or(at(value, path), default)
}

/// Array at `path`, empty when absent or not an array
#[must_use]
pub fn items<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    at(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Truthiness of the value at `path`; missing counts as false
#[must_use]
pub fn flag(value: &Value, path: &[&str]) -> bool {
    match at(value, path) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// String items of the array at `path`, first `limit` of them
#[must_use]
pub fn strings(value: &Value, path: &[&str], limit: usize) -> Vec<String> {
    items(value, path)
        .iter()
        .take(limit)
        .map(|item| display_or(Some(item), ""))
        .collect()
}

/// Whether the value at `path` is a non-empty object or array
#[must_use]
pub fn present(value: &Value, path: &[&str]) -> bool {
    match at(value, path) {
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        _ => false,
    }
}

/// First `limit` characters of `s`
#[must_use]
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
