use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::cart_actor::CartError;
use crate::domain::{CartItem, MenuItem};
use crate::messages::CartRequest;

/// Client for the cart service.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Manual method for special cases (no response needed)
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }
}

// Returns the entry's quantity after the add.
client_method!(CartClient => fn add_item(item: MenuItem) -> u32 as CartRequest::AddItem, Error = CartError);
client_method!(CartClient => fn set_quantity(item_id: String, quantity: i64) -> () as CartRequest::SetQuantity, Error = CartError);
client_method!(CartClient => fn remove_item(item_id: String) -> () as CartRequest::RemoveItem, Error = CartError);
client_method!(CartClient => fn clear() -> () as CartRequest::Clear, Error = CartError);
client_method!(CartClient => fn remove_ordered(items: Vec<CartItem>) -> () as CartRequest::RemoveOrdered, Error = CartError);
client_method!(CartClient => fn items() -> Vec<CartItem> as CartRequest::Items, Error = CartError);
client_method!(CartClient => fn total_price() -> u64 as CartRequest::TotalPrice, Error = CartError);
client_method!(CartClient => fn total_quantity() -> u64 as CartRequest::TotalQuantity, Error = CartError);
