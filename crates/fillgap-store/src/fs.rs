use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::backup::backup_name;
use crate::codec::{decode_document, encode_document};
use crate::error::{StoreError, StoreResult};
use crate::names::{is_document_name, validate_document_name};
use crate::traits::DocumentStore;

/// Document store backed by a directory tree.
///
/// A document named `legs/squats.json` lives at `<root>/legs/squats.json`.
/// Saves go through a temporary file in the destination directory that is
/// then renamed over the document, so a crash never leaves a truncated file.
#[derive(Clone, Debug)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Create a store rooted at `root`. The directory is not touched until
    /// the first operation.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store reads from and writes to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path of a document.
    pub fn path_of(&self, name: &str) -> StoreResult<PathBuf> {
        validate_document_name(name)?;
        Ok(self.root.join(name))
    }

    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Option<Vec<&str>> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect();
        Some(parts?.join("/"))
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, name: &str) -> StoreResult<Option<Value>> {
        let path = self.path_of(name)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        debug!(name, bytes = text.len(), "loaded document");
        decode_document(name, &text).map(Some)
    }

    fn save(&self, name: &str, document: &Value) -> StoreResult<()> {
        let path = self.path_of(name)?;
        let text = encode_document(document)?;

        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;

        // Temp files are created 0600; keep the document's own permissions.
        if let Ok(meta) = fs::metadata(&path) {
            fs::set_permissions(tmp.path(), meta.permissions())?;
        }

        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(name, bytes = text.len(), "saved document");
        Ok(())
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.path_of(name)?.is_file())
    }

    fn backup(&self, name: &str, at: DateTime<Local>) -> StoreResult<String> {
        let path = self.path_of(name)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        let backup = backup_name(name, &at);
        fs::copy(&path, self.root.join(&backup))?;
        info!(name, backup = %backup, "backup created");
        Ok(backup)
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            match self.relative_name(entry.path()) {
                Some(name) if is_document_name(&name) => names.push(name),
                Some(_) => {}
                None => {
                    tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn temp_store() -> (tempfile::TempDir, FsDocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());
        (dir, store)
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, h, m, s).single().unwrap()
    }

    #[test]
    fn paths_resolve_under_root() {
        let (dir, store) = temp_store();
        assert_eq!(store.root(), dir.path());
        assert_eq!(
            store.path_of("legs/squats.json").unwrap(),
            store.root().join("legs/squats.json")
        );
        assert!(store.path_of("../escape.json").is_err());
    }

    #[test]
    fn load_missing_returns_none() {
        let (_dir, store) = temp_store();
        assert!(store.load("warmups.json").unwrap().is_none());
        assert!(!store.exists("warmups.json").unwrap());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let (dir, store) = temp_store();
        let doc = json!({"tittel": "Oppvarming", "steg": [{"id": 1, "tekst": "Løp"}]});
        store.save("warmups.json", &doc).unwrap();

        assert_eq!(store.load("warmups.json").unwrap(), Some(doc));

        let text = fs::read_to_string(dir.path().join("warmups.json")).unwrap();
        assert!(text.contains("Løp"));
        assert!(text.starts_with("{\n  \"tittel\""));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn save_creates_nested_directories() {
        let (dir, store) = temp_store();
        store.save("legs/squats.json", &json!({"a": 1})).unwrap();
        assert!(dir.path().join("legs").join("squats.json").is_file());
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let (dir, store) = temp_store();
        store.save("a.json", &json!({"a": 1})).unwrap();
        store.save("a.json", &json!({"a": 2})).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, store) = temp_store();
        let path = dir.path().join("a.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        store.save("a.json", &json!({"a": 1})).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn backup_copies_current_bytes() {
        let (dir, store) = temp_store();
        fs::write(dir.path().join("a.json"), "{\"v\": 1}").unwrap();

        let backup = store.backup("a.json", at(8, 30, 0)).unwrap();
        assert_eq!(backup, "a.json.20250601_083000.bak");
        assert_eq!(
            fs::read_to_string(dir.path().join(&backup)).unwrap(),
            "{\"v\": 1}"
        );
    }

    #[test]
    fn backup_of_missing_document_fails() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.backup("a.json", at(8, 30, 0)),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn list_finds_nested_documents_and_skips_backups() {
        let (dir, store) = temp_store();
        store.save("warmups.json", &json!({})).unwrap();
        store.save("legs/squats.json", &json!({})).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        store.backup("warmups.json", at(9, 0, 0)).unwrap();

        assert_eq!(store.list().unwrap(), vec!["legs/squats.json", "warmups.json"]);
    }

    #[test]
    fn list_of_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path().join("nope"));
        assert!(matches!(store.list(), Err(StoreError::Io(_))));
    }

    #[test]
    fn decode_failure_is_reported() {
        let (dir, store) = temp_store();
        fs::write(dir.path().join("broken.json"), "[1,").unwrap();
        assert!(matches!(
            store.load("broken.json"),
            Err(StoreError::Decode { .. })
        ));
    }
}
