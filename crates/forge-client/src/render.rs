//! Terminal rendering of JSON responses.

use serde_json::Value;

/// Shorten `s` to at most `max` characters, ending in `...` when there is room.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Look up a dotted path such as `items.0.author.login`.
///
/// Numeric segments index into arrays. An empty path selects `value` itself.
pub fn select<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Pretty JSON, or compact JSON when `compact` is set. Top-level strings are
/// printed without quotes.
pub fn display(value: &Value, compact: bool) -> String {
    match value {
        Value::String(s) => s.clone(),
        other if compact => other.to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
