use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Item is currently unavailable: {0}")]
    ItemUnavailable(String),
    #[error("Item is not in the cart: {0}")]
    ItemNotInCart(String),
    #[error("Quantity out of range: {0}")]
    InvalidQuantity(i64),
    #[error("Cart total would exceed the largest representable amount")]
    TotalTooLarge,
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
