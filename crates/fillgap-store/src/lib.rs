//! Document storage for fillgap.
//!
//! A document is a UTF-8 JSON file addressed by a relative, `/`-separated
//! name. This crate loads and decodes documents, encodes and saves them back
//! in the same human-readable layout, and takes timestamped backups before a
//! document is overwritten.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`FsDocumentStore`] -- a directory tree, with atomic saves
//! - [`InMemoryDocumentStore`] -- `BTreeMap`-based store for tests and embedding

pub mod backup;
pub mod codec;
pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;

pub use backup::{backup_name, is_backup_name, BACKUP_TIMESTAMP_FORMAT};
pub use codec::{decode_document, encode_document};
pub use error::{StoreError, StoreResult};
pub use fs::FsDocumentStore;
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
