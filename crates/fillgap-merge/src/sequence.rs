//! Detection and indexing of identified-record sequences.
//!
//! An identified-record sequence is an array whose every element is an
//! object carrying an `id` key. It is the only array shape the merge joins
//! element by element; every other array is treated as an atomic value.

use std::collections::HashMap;

use serde_json::Value;

/// The key that identifies a record inside a sequence.
pub const ID_KEY: &str = "id";

/// Returns `true` if every element is an object containing [`ID_KEY`].
///
/// An empty slice qualifies vacuously.
pub fn is_identified_record_sequence(items: &[Value]) -> bool {
    items
        .iter()
        .all(|item| item.as_object().is_some_and(|record| record.contains_key(ID_KEY)))
}

/// Lookup key for an identifier.
///
/// Two identifiers get the same key exactly when they are equal as JSON
/// values: object keys are written sorted, so key order never matters, while
/// `"1"` and `1` still encode differently.
pub(crate) fn id_key(id: &Value) -> String {
    let mut key = String::new();
    write_canonical(id, &mut key);
    key
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(record) => {
            let mut keys: Vec<&String> = record.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push(':');
                write_canonical(&record[key.as_str()], out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Map each identifier in `items` to the position of its record.
///
/// Elements that are not objects, or objects without an `id`, are skipped.
/// When an identifier repeats, the last occurrence wins.
pub(crate) fn index_by_id(items: &[Value]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        if let Some(id) = item.as_object().and_then(|record| record.get(ID_KEY)) {
            index.insert(id_key(id), pos);
        }
    }
    index
}
