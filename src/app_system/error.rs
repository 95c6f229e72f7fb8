use thiserror::Error;

use crate::cart_actor::CartError;
use crate::catalog_actor::CatalogError;
use crate::notification_actor::NotificationError;
use crate::order_actor::OrderError;
use crate::session::SessionError;
use crate::storage::StorageError;

/// Errors from starting, driving, or stopping the whole system.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SystemError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error("Service task failed: {0}")]
    TaskFailed(String),
}
