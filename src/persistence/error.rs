use thiserror::Error;

use crate::platform::StorageError;

/// Persistence failures
///
/// None of these reach the UI: [`super::resolve`] and [`super::persist`]
/// log them and carry on with a usable value.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Storage unavailable")]
    StorageUnavailable,

    #[error("Corrupt persisted data at '{key}': {source}")]
    CorruptPersistedData {
        key: String,
        source: serde_json::Error,
    },

    #[error("Failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to read '{key}': {source}")]
    Read { key: String, source: StorageError },

    #[error("Failed to write '{key}': {source}")]
    WriteFailure { key: String, source: StorageError },
}
