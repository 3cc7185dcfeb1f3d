//! Change set produced by a merge.
//!
//! Every change is addressed by an RFC 6901 JSON Pointer into the target
//! document, so a report can be printed or serialized without holding on to
//! the trees themselves.

use serde::Serialize;
use serde_json::Value;

/// The changes a merge made to the target document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MergeReport {
    /// Changes in the order the merge made them.
    pub changes: Vec<MergeChange>,
}

impl MergeReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the merge left the target unchanged.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of keys that were filled from the source.
    pub fn filled(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, MergeChange::Filled { .. }))
            .count()
    }

    /// Number of records appended to identified-record sequences.
    pub fn appended(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, MergeChange::Appended { .. }))
            .count()
    }

    pub(crate) fn push(&mut self, change: MergeChange) {
        self.changes.push(change);
    }
}

/// A single change made to the target document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MergeChange {
    /// A key was absent (`placeholder` is `None`) or held an empty
    /// placeholder, and now carries the source value.
    Filled {
        path: String,
        placeholder: Option<Value>,
    },
    /// A source record with no counterpart was appended to the sequence.
    Appended { path: String, id: Value },
}

impl MergeChange {
    /// The JSON Pointer of the changed location.
    pub fn path(&self) -> &str {
        match self {
            Self::Filled { path, .. } | Self::Appended { path, .. } => path,
        }
    }
}

/// Append one reference token to a JSON Pointer.
pub(crate) fn child_pointer(parent: &str, token: &str) -> String {
    let mut out = String::with_capacity(parent.len() + token.len() + 1);
    out.push_str(parent);
    out.push('/');
    for ch in token.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            other => out.push(other),
        }
    }
    out
}

/// Append an array index to a JSON Pointer.
pub(crate) fn index_pointer(parent: &str, index: usize) -> String {
    format!("{parent}/{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pointer_escapes_reserved_characters() {
        assert_eq!(child_pointer("", "title"), "/title");
        assert_eq!(child_pointer("/a", "b/c"), "/a/b~1c");
        assert_eq!(child_pointer("", "~x"), "/~0x");
        assert_eq!(child_pointer("", ""), "/");
    }

    #[test]
    fn index_pointer_appends_position() {
        assert_eq!(index_pointer("/steps", 3), "/steps/3");
    }

    #[test]
    fn counts_by_kind() {
        let mut report = MergeReport::new();
        assert!(report.is_empty());

        report.push(MergeChange::Filled {
            path: "/title".into(),
            placeholder: Some(json!("")),
        });
        report.push(MergeChange::Filled {
            path: "/summary".into(),
            placeholder: None,
        });
        report.push(MergeChange::Appended {
            path: "/steps/1".into(),
            id: json!(2),
        });

        assert_eq!(report.len(), 3);
        assert_eq!(report.filled(), 2);
        assert_eq!(report.appended(), 1);
        assert_eq!(report.changes[2].path(), "/steps/1");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let change = MergeChange::Appended {
            path: "/steps/0".into(),
            id: json!("warmup-1"),
        };
        let encoded = serde_json::to_value(&change).unwrap();
        assert_eq!(
            encoded,
            json!({"kind": "appended", "path": "/steps/0", "id": "warmup-1"})
        );
    }
}
