use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during notification operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Notification not found: {0}")]
    NotFound(String),
    #[error("Notification message is empty")]
    EmptyMessage,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<NotificationError>> for NotificationError {
    fn from(e: FrameworkError<NotificationError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => NotificationError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => NotificationError::ActorCommunicationError(other.to_string()),
        }
    }
}
