use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::backup::backup_name;
use crate::codec::{decode_document, encode_document};
use crate::error::{StoreError, StoreResult};
use crate::names::{is_document_name, validate_document_name};
use crate::traits::DocumentStore;

/// In-memory, `BTreeMap`-based document store.
///
/// Intended for tests and embedding. Documents are kept as encoded text, so
/// loads go through the same codec as the filesystem store and backups are
/// plain text copies.
pub struct InMemoryDocumentStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store raw text under `name`, bypassing the encoder.
    pub fn insert_raw(&self, name: &str, text: impl Into<String>) -> StoreResult<()> {
        validate_document_name(name)?;
        self.entries
            .write()
            .expect("lock poisoned")
            .insert(name.to_string(), text.into());
        Ok(())
    }

    /// The raw text stored under `name`, including backups.
    pub fn raw(&self, name: &str) -> Option<String> {
        self.entries.read().expect("lock poisoned").get(name).cloned()
    }

    /// All stored names, documents and backups alike.
    pub fn all_names(&self) -> Vec<String> {
        self.entries.read().expect("lock poisoned").keys().cloned().collect()
    }

    /// Number of stored entries, backups included.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self, name: &str) -> StoreResult<Option<Value>> {
        validate_document_name(name)?;
        let map = self.entries.read().expect("lock poisoned");
        map.get(name)
            .map(|text| decode_document(name, text))
            .transpose()
    }

    fn save(&self, name: &str, document: &Value) -> StoreResult<()> {
        validate_document_name(name)?;
        let text = encode_document(document)?;
        let mut map = self.entries.write().expect("lock poisoned");
        map.insert(name.to_string(), text);
        Ok(())
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        validate_document_name(name)?;
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.contains_key(name))
    }

    fn backup(&self, name: &str, at: DateTime<Local>) -> StoreResult<String> {
        validate_document_name(name)?;
        let mut map = self.entries.write().expect("lock poisoned");
        let text = map
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let backup = backup_name(name, &at);
        map.insert(backup.clone(), text);
        Ok(backup)
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.keys().filter(|name| is_document_name(name)).cloned().collect())
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("entry_count", &self.len())
            .finish()
    }
}
