use crate::domain::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to the given status.
    ///
    /// # Errors
    /// Fails with `InvalidTransition` unless the edge is in the lifecycle table.
    Advance(OrderStatus),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Advance(StatusChange),
}

/// A status edge that was just applied to an order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub order_id: String,
    pub user_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl StatusChange {
    /// Only `preparing -> ready` tells the customer to come and collect.
    pub fn notifies_customer(&self) -> bool {
        self.from == OrderStatus::Preparing && self.to == OrderStatus::Ready
    }
}
