use chrono::{DateTime, Local};
use serde_json::Value;

use crate::error::StoreResult;

/// A named collection of JSON documents.
///
/// All implementations must satisfy these invariants:
/// - Names are validated with [`crate::names::validate_document_name`]
///   before any access.
/// - `save` replaces the whole document; readers never observe a partially
///   written document.
/// - A backup is a byte-for-byte copy of the stored text, so it can be
///   restored even if it would not decode.
/// - All I/O errors are propagated, never silently ignored.
pub trait DocumentStore: Send + Sync {
    /// Load and decode a document.
    ///
    /// Returns `Ok(None)` if the document does not exist.
    fn load(&self, name: &str) -> StoreResult<Option<Value>>;

    /// Encode and store a document, replacing any previous version.
    fn save(&self, name: &str, document: &Value) -> StoreResult<()>;

    /// Check whether a document exists.
    fn exists(&self, name: &str) -> StoreResult<bool>;

    /// Copy the stored document to a timestamped backup and return the
    /// backup's name.
    ///
    /// Fails with [`crate::StoreError::NotFound`] if the document does not
    /// exist.
    fn backup(&self, name: &str, at: DateTime<Local>) -> StoreResult<String>;

    /// Names of all documents in the store, sorted. Backups are excluded.
    fn list(&self) -> StoreResult<Vec<String>>;
}
