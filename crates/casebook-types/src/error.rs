use thiserror::Error;

/// Errors from key-value storage operations (used by trait definitions in
/// casebook-core).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
