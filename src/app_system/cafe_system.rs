use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::cart_actor::CartService;
use crate::catalog_actor::{sample_menu, CatalogError};
use crate::clients::{CartClient, CatalogClient, NotificationClient, OrderClient};
use crate::domain::{CartItem, MenuItem, Notification, Order, OrderStatus, Role};
use crate::order_actor::{OrderError, StatusChange};
use crate::pending::PendingFlag;
use crate::session::Session;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use super::{CafeConfig, SystemError};

/// The application system: owns every service for the lifetime of the process.
///
/// Responsible for restoring persisted state, starting the services, wiring
/// them together, and shutting them down. Presentation code talks to the
/// public clients; nothing is reachable through globals.
pub struct CafeSystem {
    pub catalog: CatalogClient,
    pub cart: CartClient,
    pub orders: OrderClient,
    pub notifications: NotificationClient,
    pub session: Session,
    checkout_delay: Duration,
    checkout_pending: PendingFlag,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CafeSystem {
    /// Opens the store named by the config and starts the system on it.
    pub async fn start(config: &CafeConfig) -> Result<Self, SystemError> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => Arc::new(MemoryStore::new()),
        };
        Self::with_store(config, store).await
    }

    /// Create and start the system on an existing store.
    ///
    /// **Startup Order:**
    /// 1. Restore the session and rehydrate the cart (before any read)
    /// 2. Start the leaf services (catalog, notifications)
    /// 3. Start the order ledger with the notification client injected
    /// 4. Seed the menu
    #[instrument(name = "cafe_system", skip_all)]
    pub async fn with_store(
        config: &CafeConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, SystemError> {
        let capacity = config.channel_capacity;
        let mut handles = Vec::new();

        info!("Starting cafe system");

        let session = Session::restore(store.clone(), config.login_delay())?;

        let (cart_service, cart) = CartService::new(capacity, store)?;
        handles.push(tokio::spawn(cart_service.run()));

        let (catalog_actor, catalog_inner) = ResourceActor::<MenuItem>::new(capacity, sequential_ids(""));
        handles.push(tokio::spawn(catalog_actor.run()));
        let catalog = CatalogClient::new(catalog_inner);

        let (notification_actor, notification_inner) =
            ResourceActor::<Notification>::new(capacity, sequential_ids("notif-"));
        handles.push(tokio::spawn(notification_actor.run()));
        let notifications = NotificationClient::new(notification_inner);

        let (order_actor, order_inner) = ResourceActor::<Order>::new(capacity, sequential_ids("order-"));
        handles.push(tokio::spawn(order_actor.run()));
        let orders = OrderClient::new(order_inner, notifications.clone());

        if config.seed_menu {
            for item in sample_menu() {
                catalog.add_item(item).await?;
            }
        }

        info!("Cafe system started successfully");

        Ok(Self {
            catalog,
            cart,
            orders,
            notifications,
            session,
            checkout_delay: config.checkout_delay(),
            checkout_pending: PendingFlag::new(),
            handles,
        })
    }

    /// Adds one unit of a catalog item to the cart. Returns the new quantity.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, item_id: &str) -> Result<u32, SystemError> {
        let item = self
            .catalog
            .get_item(item_id.to_string())
            .await?
            .ok_or_else(|| CatalogError::NotFound(item_id.to_string()))?;
        Ok(self.cart.add_item(item).await?)
    }

    pub fn is_checkout_pending(&self) -> bool {
        self.checkout_pending.is_pending()
    }

    /// Pays for the current cart (simulated) and places the order.
    ///
    /// The order is built from the cart as it stands after the payment
    /// delay. Only the ordered quantities are taken out of the cart, after
    /// the order exists, so anything added meanwhile stays. Payment always
    /// succeeds.
    ///
    /// # Errors
    /// `CheckoutInProgress` while another checkout is waiting on payment;
    /// otherwise the errors of [`OrderClient::place_order`].
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<String, OrderError> {
        let Some(_guard) = self.checkout_pending.try_begin() else {
            warn!("Checkout already in progress");
            return Err(OrderError::CheckoutInProgress);
        };

        let identity = self.session.current();
        if identity.is_none() {
            return Err(OrderError::Unauthenticated);
        }
        if self.cart_snapshot().await?.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        info!(delay_ms = self.checkout_delay.as_millis() as u64, "Processing payment");
        tokio::time::sleep(self.checkout_delay).await;

        let items = self.cart_snapshot().await?;
        let order_id = self.orders.place_order(identity.as_ref(), items.clone()).await?;

        if let Err(e) = self.cart.remove_ordered(items).await {
            error!(order_id = %order_id, error = %e, "Order placed but cart could not be updated");
        }
        info!(order_id = %order_id, "Checkout complete");
        Ok(order_id)
    }

    async fn cart_snapshot(&self) -> Result<Vec<CartItem>, OrderError> {
        self.cart
            .items()
            .await
            .map_err(|e| OrderError::Cart(e.to_string()))
    }

    /// Changes an order's status on behalf of the signed-in user.
    ///
    /// Staff may move orders through the kitchen or cancel them; a client may
    /// only confirm pickup of their own order.
    #[instrument(skip(self))]
    pub async fn advance_order(
        &self,
        order_id: String,
        status: OrderStatus,
    ) -> Result<StatusChange, OrderError> {
        let user = self.session.current().ok_or(OrderError::Unauthenticated)?;
        let forbidden = OrderError::Forbidden {
            role: user.role,
            to: status,
        };
        if !user.role.may_set_status(status) {
            warn!(role = %user.role, "Status change not allowed for role");
            return Err(forbidden);
        }

        match user.role {
            Role::Client => {
                let order = self
                    .orders
                    .get_order(order_id.clone())
                    .await?
                    .ok_or_else(|| OrderError::NotFound(order_id.clone()))?;
                if order.user_id != user.id {
                    warn!("Client tried to change someone else's order");
                    return Err(forbidden);
                }
            }
            Role::Admin | Role::Cafeteria => {}
        }

        self.orders.update_status(order_id, status).await
    }

    /// Gracefully shutdown every service
    ///
    /// **Shutdown Order:** the ledger first (it depends on notifications),
    /// then the leaf services, then wait for all tasks.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down cafe system");

        let _ = self.orders.shutdown().await;
        let _ = self.notifications.shutdown().await;
        let _ = self.catalog.shutdown().await;
        let _ = self.cart.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("Cafe system shutdown complete");
        Ok(())
    }
}
