//! Document name validation.
//!
//! Document names are relative, `/`-separated paths such as
//! `warmups.json` or `exercises/legs.json`:
//! - Must be non-empty
//! - Must not start with `/` or contain `\`
//! - Components must be non-empty and must not be `.` or `..`

use crate::error::{StoreError, StoreResult};

/// Extension that marks a file as a document.
pub const DOCUMENT_EXTENSION: &str = ".json";

/// Validate a document name, returning `Ok(())` if it is usable.
///
/// # Examples
///
/// ```
/// use fillgap_store::names::validate_document_name;
///
/// assert!(validate_document_name("warmups.json").is_ok());
/// assert!(validate_document_name("legs/squats.json").is_ok());
/// assert!(validate_document_name("").is_err());
/// assert!(validate_document_name("../secrets.json").is_err());
/// ```
pub fn validate_document_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::invalid_name(name, "name must not be empty"));
    }

    if name.starts_with('/') {
        return Err(StoreError::invalid_name(name, "name must be relative"));
    }

    if name.contains('\\') {
        return Err(StoreError::invalid_name(name, "use '/' as the separator"));
    }

    for component in name.split('/') {
        match component {
            "" => return Err(StoreError::invalid_name(name, "empty path component")),
            "." | ".." => {
                return Err(StoreError::invalid_name(
                    name,
                    "must not contain '.' or '..' components",
                ))
            }
            _ => {}
        }
    }

    Ok(())
}

/// Returns `true` if `name` looks like a document rather than a backup.
pub fn is_document_name(name: &str) -> bool {
    name.ends_with(DOCUMENT_EXTENSION)
}
