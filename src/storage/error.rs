use thiserror::Error;

/// Errors from the persistence layer.
///
/// Holds rendered messages so the error stays `Clone` and can travel through
/// actor reply channels.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Stored value is not valid JSON: {0}")]
    Serialization(String),
    #[error("Storage lock poisoned")]
    Poisoned,
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}
