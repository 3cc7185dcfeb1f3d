//! The emptiness predicate that decides whether a target field needs filling.

use serde_json::Value;

/// Returns `true` if a target value counts as a gap.
///
/// Exactly four shapes are gaps: `""`, `null`, `[]` and `{}`. Everything
/// else is present, including `0`, `false` and whitespace-only strings. The
/// check is shallow: an object whose fields are all empty is still present.
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
