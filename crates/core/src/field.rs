//! Shape-tolerant field access over raw ledger records.
//!
//! Different data sources deliver the same contract with its fields either
//! at the top level or nested one level under a `payload` key, and with
//! camelCase or snake_case names. A single source never mixes shapes
//! within one record, but which shape is used varies by source, so every
//! field access goes through an ordered candidate list.

use serde_json::Value;

/// Resolve the first matching candidate field from a raw record.
///
/// For each candidate name in order, the record's top level is checked
/// before its nested `payload` object. JSON `null` counts as "not found"
/// and falls through to the next candidate. Returns `None` when no
/// candidate matches anywhere.
pub fn resolve_field<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    for name in candidates {
        if let Some(v) = non_null(record.get(name)) {
            return Some(v);
        }
        if let Some(v) = non_null(record.get("payload").and_then(|p| p.get(name))) {
            return Some(v);
        }
    }
    None
}

fn non_null(v: Option<&Value>) -> Option<&Value> {
    v.filter(|v| !v.is_null())
}

/// Resolve a candidate field as a string slice.
pub fn resolve_str<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a str> {
    resolve_field(record, candidates).and_then(Value::as_str)
}

/// Resolve a candidate field as an unsigned integer.
///
/// Numeric ledger fields arrive as JSON numbers from some sources and as
/// decimal strings from others; both are accepted.
pub fn resolve_u64(record: &Value, candidates: &[&str]) -> Option<u64> {
    match resolve_field(record, candidates)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
