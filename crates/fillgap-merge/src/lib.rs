//! Gap-filling merge for partially translated JSON documents.
//!
//! Given a complete source document and a target document that is a partial
//! translation of it, fills every gap in the target from the source while
//! keeping everything the target already provides.
//!
//! # Rules
//!
//! For each source key, at any depth:
//!
//! 1. Target lacks the key, or holds `""`, `null`, `[]` or `{}`: copy the
//!    source value.
//! 2. Both sides are objects: recurse.
//! 3. Both sides are arrays and every source element is an object with an
//!    `id`: join on `id`, merging matched records and appending the rest.
//! 4. Anything else: keep the target value as is.
//!
//! # Key Types
//!
//! - [`merge_documents`] / [`merge`] -- entry points
//! - [`MergeReport`] / [`MergeChange`] -- what a merge changed, by JSON Pointer
//! - [`MergeError`] -- root type mismatches

pub mod error;
pub mod merger;
pub mod missing;
pub mod report;
pub mod sequence;

pub use error::{MergeError, MergeResult, Side, ValueKind};
pub use merger::{merge, merge_documents};
pub use missing::is_missing;
pub use report::{MergeChange, MergeReport};
pub use sequence::{is_identified_record_sequence, ID_KEY};
