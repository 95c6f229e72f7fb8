use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::{OrderStatus, Role};

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("No signed-in user; log in before placing an order")]
    Unauthenticated,
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Role {role} may not set an order to {to}")]
    Forbidden { role: Role, to: OrderStatus },
    #[error("A checkout is already in progress")]
    CheckoutInProgress,
    #[error("Could not read the cart: {0}")]
    Cart(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(e: FrameworkError<OrderError>) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
