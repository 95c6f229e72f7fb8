use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::NotificationClient;
use crate::domain::{
    CartItem, Notification, NotificationCreate, Order, OrderCreate, OrderStats, OrderStatus,
    StatusBoard, User,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError, StatusChange};

/// Client for the order ledger.
///
/// Orchestrates the side effects of ledger changes: placing an order
/// notifies the cafeteria, and `preparing -> ready` notifies the customer.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    notifications: NotificationClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, notifications: NotificationClient) -> Self {
        Self {
            inner,
            notifications,
        }
    }

    /// Places an order from a cart snapshot and returns its id.
    ///
    /// Does not touch the cart; the caller clears it once this succeeds.
    /// Once the order is recorded the call succeeds: a failed cafeteria
    /// notice is logged, not returned.
    ///
    /// # Errors
    /// `Unauthenticated` without an identity, `EmptyCart` for an empty
    /// snapshot. Nothing is created in either case.
    #[instrument(skip(self, identity, items), fields(user_id = tracing::field::Empty, item_count = items.len()))]
    pub async fn place_order(
        &self,
        identity: Option<&User>,
        items: Vec<CartItem>,
    ) -> Result<String, OrderError> {
        info!("Processing place_order request");

        // Step 1: Validate identity
        let Some(user) = identity else {
            warn!("Checkout without a signed-in user");
            return Err(OrderError::Unauthenticated);
        };
        tracing::Span::current().record("user_id", user.id.as_str());

        // Step 2: Validate snapshot
        if items.is_empty() {
            warn!("Checkout with an empty cart");
            return Err(OrderError::EmptyCart);
        }

        // Step 3: Record the order
        let order_id = self
            .inner
            .create(OrderCreate::from_checkout(user, items))
            .await
            .map_err(OrderError::from)?;
        info!(order_id = %order_id, "Order recorded");

        // Step 4: Tell the kitchen. The order stands even if this fails.
        let notice = NotificationCreate::order_placed(&order_id, &user.name);
        if let Err(e) = self.notifications.notify(notice).await {
            error!(order_id = %order_id, error = %e, "Order placed but cafeteria was not notified");
        }

        Ok(order_id)
    }

    /// Moves an order along one edge of the lifecycle.
    ///
    /// A committed change is reported as success even if the ready notice
    /// could not be sent.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `InvalidTransition` for any edge not in
    /// the lifecycle table. The order is unchanged on error.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: String,
        status: OrderStatus,
    ) -> Result<StatusChange, OrderError> {
        debug!("Sending request");
        let OrderActionResult::Advance(change) = self
            .inner
            .perform_action(order_id, OrderAction::Advance(status))
            .await?;
        info!(from = %change.from, to = %change.to, "Order status updated");

        if change.notifies_customer() {
            let notice = NotificationCreate::order_ready(&change.order_id, &change.user_id);
            if let Err(e) = self.notifications.notify(notice).await {
                error!(error = %e, "Status updated but customer was not notified");
            }
        }

        Ok(change)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    /// The whole ledger in placement order.
    #[instrument(skip(self))]
    pub async fn all_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn orders_for(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        let orders = self.all_orders().await?;
        Ok(orders.into_iter().filter(|order| order.user_id == user_id).collect())
    }

    /// A user's orders still in the kitchen: pending, preparing or ready.
    #[instrument(skip(self))]
    pub async fn active_orders_for(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders_for(user_id).await?;
        Ok(orders.into_iter().filter(|order| !order.status.is_terminal()).collect())
    }

    /// A user's completed and cancelled orders.
    #[instrument(skip(self))]
    pub async fn past_orders_for(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders_for(user_id).await?;
        Ok(orders.into_iter().filter(|order| order.status.is_terminal()).collect())
    }

    #[instrument(skip(self))]
    pub async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let orders = self.all_orders().await?;
        Ok(orders.into_iter().filter(|order| order.status == status).collect())
    }

    /// Orders whose id, customer name or roll number contains `query`, ignoring case.
    #[instrument(skip(self))]
    pub async fn search_orders(&self, query: &str) -> Result<Vec<Order>, OrderError> {
        let orders = self.all_orders().await?;
        Ok(orders.into_iter().filter(|order| order.matches(query)).collect())
    }

    pub async fn status_board(&self, query: &str) -> Result<StatusBoard, OrderError> {
        Ok(StatusBoard::from_orders(self.search_orders(query).await?))
    }

    pub async fn stats(&self) -> Result<OrderStats, OrderError> {
        Ok(OrderStats::from_orders(&self.all_orders().await?))
    }

    /// Resolves a notification's order reference.
    ///
    /// `None` when the notification has no order or the order is gone;
    /// callers render that as "order unavailable".
    pub async fn order_for_notification(
        &self,
        notification: &Notification,
    ) -> Result<Option<Order>, OrderError> {
        match &notification.order_id {
            Some(id) => self.get_order(id.clone()).await,
            None => Ok(None),
        }
    }

    pub async fn shutdown(&self) -> Result<(), OrderError> {
        Ok(self.inner.shutdown().await?)
    }
}
