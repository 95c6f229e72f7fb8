use tokio::sync::oneshot;

use crate::cart_actor::CartError;
use crate::domain::{CartItem, MenuItem};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the cart service. Each variant carries its parameters
/// and a oneshot channel for the reply.
#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        item: MenuItem,
        respond_to: ServiceResponse<u32, CartError>,
    },
    SetQuantity {
        item_id: String,
        quantity: i64,
        respond_to: ServiceResponse<(), CartError>,
    },
    RemoveItem {
        item_id: String,
        respond_to: ServiceResponse<(), CartError>,
    },
    Clear {
        respond_to: ServiceResponse<(), CartError>,
    },
    /// Takes the quantities of a placed order out of the cart, leaving
    /// anything added since the order's snapshot.
    RemoveOrdered {
        items: Vec<CartItem>,
        respond_to: ServiceResponse<(), CartError>,
    },
    Items {
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    TotalPrice {
        respond_to: ServiceResponse<u64, CartError>,
    },
    TotalQuantity {
        respond_to: ServiceResponse<u64, CartError>,
    },
    Shutdown,
}
