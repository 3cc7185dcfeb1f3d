//! High-level fillgap API.
//!
//! Ties the merge core to document storage: for each document name, load the
//! source and target, fill the target's gaps, back the target up and save
//! it. This is the main entry point for applications embedding fillgap.

pub mod error;
pub mod outcome;
pub mod reconciler;

pub use error::{SdkError, SdkResult};
pub use outcome::{BatchReport, FileOutcome};
pub use reconciler::{ReconcileOptions, Reconciler};

// Re-export key types
pub use fillgap_merge::{merge_documents, MergeChange, MergeReport};
pub use fillgap_store::{DocumentStore, FsDocumentStore, InMemoryDocumentStore};
