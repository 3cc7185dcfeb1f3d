use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("cannot merge {name}: {source}")]
    Merge {
        name: String,
        #[source]
        source: fillgap_merge::MergeError,
    },

    #[error("store error: {0}")]
    Store(#[from] fillgap_store::StoreError),
}

pub type SdkResult<T> = Result<T, SdkError>;
