use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during login and logout.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
    #[error("A login is already in progress")]
    LoginInProgress,
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}
