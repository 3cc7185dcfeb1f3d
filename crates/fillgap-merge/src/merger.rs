//! Recursive gap-filling merge.
//!
//! For every source key the merge either copies the source value (the target
//! lacks the key or holds an empty placeholder), recurses (both sides are
//! objects, or both are arrays and the source is an identified-record
//! sequence), or leaves the target alone.

use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::{MergeError, MergeResult, Side, ValueKind};
use crate::missing::is_missing;
use crate::report::{child_pointer, index_pointer, MergeChange, MergeReport};
use crate::sequence::{id_key, index_by_id, is_identified_record_sequence, ID_KEY};

/// Merge two whole documents.
///
/// Both roots must be objects. On a type mismatch nothing is modified.
pub fn merge_documents(source: &Value, target: &mut Value) -> MergeResult<MergeReport> {
    let source = match source {
        Value::Object(map) => map,
        other => return Err(root_mismatch(Side::Source, other)),
    };
    match target {
        Value::Object(map) => Ok(merge(source, map)),
        other => Err(root_mismatch(Side::Target, other)),
    }
}

/// Fill every gap in `target` from `source`, in place.
pub fn merge(source: &Map<String, Value>, target: &mut Map<String, Value>) -> MergeReport {
    let mut report = MergeReport::new();
    merge_records(source, target, "", &mut report);
    report
}

fn root_mismatch(side: Side, found: &Value) -> MergeError {
    MergeError::TypeMismatch {
        side,
        expected: ValueKind::Object,
        found: ValueKind::of(found),
    }
}

fn merge_records(
    source: &Map<String, Value>,
    target: &mut Map<String, Value>,
    path: &str,
    report: &mut MergeReport,
) {
    for (key, source_value) in source {
        match target.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(source_value.clone());
                report.push(MergeChange::Filled {
                    path: child_pointer(path, key),
                    placeholder: None,
                });
            }
            Entry::Occupied(mut slot) => {
                let target_value = slot.get_mut();
                if is_missing(target_value) {
                    // Replacing "" with "" is not a change worth reporting.
                    if *target_value != *source_value {
                        let placeholder = std::mem::replace(target_value, source_value.clone());
                        report.push(MergeChange::Filled {
                            path: child_pointer(path, key),
                            placeholder: Some(placeholder),
                        });
                    }
                } else {
                    merge_present(source_value, target_value, &child_pointer(path, key), report);
                }
            }
        }
    }
}

/// The target already holds a present value: recurse or leave it alone.
fn merge_present(source: &Value, target: &mut Value, path: &str, report: &mut MergeReport) {
    match (source, target) {
        (Value::Object(source), Value::Object(target)) => {
            merge_records(source, target, path, report);
        }
        (Value::Array(source), Value::Array(target)) if is_identified_record_sequence(source) => {
            join_sequences(source, target, path, report);
        }
        // Scalars, mismatched kinds and plain arrays are atomic.
        _ => {}
    }
}

/// Join two sequences on their `id` field.
///
/// Matched records are merged in place; unmatched source records are
/// appended in source order. The lookup is built once up front, so records
/// appended here are never matched by later source records.
fn join_sequences(source: &[Value], target: &mut Vec<Value>, path: &str, report: &mut MergeReport) {
    let index = index_by_id(target);

    for entry in source {
        let Some(id) = entry.get(ID_KEY) else {
            continue;
        };

        match index.get(&id_key(id)) {
            Some(&pos) => {
                if let (Value::Object(source), Value::Object(target)) = (entry, &mut target[pos]) {
                    merge_records(source, target, &index_pointer(path, pos), report);
                }
            }
            None => {
                report.push(MergeChange::Appended {
                    path: index_pointer(path, target.len()),
                    id: id.clone(),
                });
                target.push(entry.clone());
            }
        }
    }
}
