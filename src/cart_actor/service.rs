use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::CartClient;
use crate::domain::{checked_total_price, total_price, total_quantity, CartItem, MenuItem};
use crate::messages::{CartRequest, ServiceResponse};
use crate::storage::{load_json, save_json, KeyValueStore, StorageError, CART_KEY};
use super::CartError;

/// Macro for clean error response handling
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

/// Cart actor. Holds one entry per menu item id, in the order items were
/// first added, and writes the whole cart to storage after every change.
///
/// Mutations are applied to a draft, persisted, and only then committed,
/// so a failed write leaves the cart exactly as it was.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    entries: IndexMap<String, CartItem>,
    store: Arc<dyn KeyValueStore>,
}

impl CartService {
    /// Creates the service, rehydrating from the last persisted snapshot.
    ///
    /// # Errors
    /// Fails if storage cannot be read. A snapshot that is not valid JSON is
    /// discarded with a warning instead.
    pub fn new(
        buffer_size: usize,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<(Self, CartClient), CartError> {
        let entries = rehydrate(store.as_ref())?;
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            entries,
            store,
        };
        Ok((service, CartClient::new(sender)))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(entries = self.entries.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem { item, respond_to } => {
                    self.handle_add_item(item, respond_to);
                }
                CartRequest::SetQuantity {
                    item_id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_set_quantity(item_id, quantity, respond_to);
                }
                CartRequest::RemoveItem { item_id, respond_to } => {
                    self.handle_remove_item(item_id, respond_to);
                }
                CartRequest::Clear { respond_to } => {
                    self.handle_clear(respond_to);
                }
                CartRequest::RemoveOrdered { items, respond_to } => {
                    self.handle_remove_ordered(items, respond_to);
                }
                CartRequest::Items { respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
                CartRequest::TotalPrice { respond_to } => {
                    let _ = respond_to.send(Ok(total_price(&self.snapshot())));
                }
                CartRequest::TotalQuantity { respond_to } => {
                    let _ = respond_to.send(Ok(total_quantity(&self.snapshot())));
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    fn snapshot(&self) -> Vec<CartItem> {
        self.entries.values().cloned().collect()
    }

    fn commit(&mut self, draft: IndexMap<String, CartItem>) -> Result<(), CartError> {
        let lines: Vec<CartItem> = draft.values().cloned().collect();
        if checked_total_price(&lines).is_none() {
            warn!("Cart total overflows");
            return Err(CartError::TotalTooLarge);
        }
        let snapshot: Vec<&CartItem> = draft.values().collect();
        save_json(self.store.as_ref(), CART_KEY, &snapshot)?;
        self.entries = draft;
        Ok(())
    }

    #[instrument(fields(item_id = %item.id, item_name = %item.name), skip(self, item, respond_to))]
    fn handle_add_item(&mut self, item: MenuItem, respond_to: ServiceResponse<u32, CartError>) {
        debug!("Processing add_item request");

        if !item.available {
            warn!("Refusing to add unavailable item");
            send_error!(respond_to, CartError::ItemUnavailable(item.id));
        }

        let mut draft = self.entries.clone();
        let entry = draft
            .entry(item.id.clone())
            .or_insert_with(|| CartItem::new(item, 0));
        entry.quantity = entry.quantity.saturating_add(1);
        let quantity = entry.quantity;

        let result = self.commit(draft).map(|()| {
            info!(quantity, "Item added to cart");
            quantity
        });
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_set_quantity(
        &mut self,
        item_id: String,
        quantity: i64,
        respond_to: ServiceResponse<(), CartError>,
    ) {
        debug!("Processing set_quantity request");

        if quantity <= 0 {
            let result = self.remove_entry(&item_id);
            let _ = respond_to.send(result);
            return;
        }

        let Ok(quantity) = u32::try_from(quantity) else {
            warn!("Quantity too large");
            send_error!(respond_to, CartError::InvalidQuantity(quantity));
        };

        let mut draft = self.entries.clone();
        let Some(entry) = draft.get_mut(&item_id) else {
            warn!("Item not in cart");
            send_error!(respond_to, CartError::ItemNotInCart(item_id));
        };
        entry.quantity = quantity;

        let result = self.commit(draft);
        if result.is_ok() {
            info!("Cart quantity updated");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_item(&mut self, item_id: String, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing remove_item request");
        let _ = respond_to.send(self.remove_entry(&item_id));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear(&mut self, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing clear request");
        let result = self.commit(IndexMap::new());
        if result.is_ok() {
            info!("Cart cleared");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, items, respond_to), fields(lines = items.len()))]
    fn handle_remove_ordered(&mut self, items: Vec<CartItem>, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing remove_ordered request");
        let mut draft = self.entries.clone();
        for ordered in &items {
            let id = &ordered.menu_item.id;
            let remaining = draft
                .get(id)
                .map(|entry| entry.quantity.saturating_sub(ordered.quantity));
            match remaining {
                Some(0) => {
                    draft.shift_remove(id);
                }
                Some(quantity) => {
                    if let Some(entry) = draft.get_mut(id) {
                        entry.quantity = quantity;
                    }
                }
                None => {}
            }
        }

        let result = self.commit(draft);
        if result.is_ok() {
            info!(remaining = self.entries.len(), "Ordered items removed from cart");
        }
        let _ = respond_to.send(result);
    }

    fn remove_entry(&mut self, item_id: &str) -> Result<(), CartError> {
        if !self.entries.contains_key(item_id) {
            debug!("Item already absent");
            return Ok(());
        }
        let mut draft = self.entries.clone();
        draft.shift_remove(item_id);
        self.commit(draft)?;
        info!("Item removed from cart");
        Ok(())
    }
}

fn rehydrate(store: &dyn KeyValueStore) -> Result<IndexMap<String, CartItem>, CartError> {
    let saved: Vec<CartItem> = match load_json(store, CART_KEY) {
        Ok(saved) => saved.unwrap_or_default(),
        Err(StorageError::Serialization(e)) => {
            warn!(error = %e, "Discarding unreadable saved cart");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    let mut entries = IndexMap::new();
    for item in saved.into_iter().filter(|item| item.quantity > 0) {
        entries.insert(item.menu_item.id.clone(), item);
    }
    debug!(entries = entries.len(), "Cart rehydrated");
    Ok(entries)
}
