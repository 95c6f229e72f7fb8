use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Menu item not found: {0}")]
    NotFound(String),
    #[error("Invalid menu item: {0}")]
    InvalidItem(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<CatalogError>> for CatalogError {
    fn from(e: FrameworkError<CatalogError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}
