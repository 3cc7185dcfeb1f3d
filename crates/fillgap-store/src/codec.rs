//! JSON text encoding for documents.
//!
//! Documents are written with two-space indentation, non-ASCII characters
//! verbatim, keys in their original order and no trailing newline.

use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Decode document text. `name` is only used for error reporting.
pub fn decode_document(name: &str, text: &str) -> StoreResult<Value> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    serde_json::from_str(text).map_err(|source| StoreError::Decode {
        name: name.to_string(),
        source,
    })
}

/// Encode a document as pretty-printed JSON text.
pub fn encode_document(document: &Value) -> StoreResult<String> {
    serde_json::to_string_pretty(document).map_err(StoreError::Encode)
}
