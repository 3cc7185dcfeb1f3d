/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The document name is empty, absolute, or escapes the store root.
    #[error("invalid document name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The stored text is not valid JSON.
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be encoded as JSON text.
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create an invalid-name error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
