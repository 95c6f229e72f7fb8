use std::convert::Infallible;

use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentStatus};
use super::actions::{OrderAction, OrderActionResult, StatusChange};
use super::OrderError;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = Infallible;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from a checkout snapshot.
    ///
    /// The total is computed here, once, from the snapshot's prices. Payment
    /// is simulated and always recorded as completed.
    ///
    /// # Errors
    /// Returns `EmptyCart` if the snapshot has no items.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let total_amount = params.total_amount();
        Ok(Self {
            id,
            user_id: params.user_id,
            user_name: params.user_name,
            roll_number: params.roll_number,
            items: params.items,
            status: OrderStatus::Pending,
            total_amount,
            order_time: Utc::now(),
            payment_status: PaymentStatus::Completed,
        })
    }

    /// Orders have no editable fields; status moves through actions only.
    fn on_update(&mut self, patch: Infallible) -> Result<(), OrderError> {
        match patch {}
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Advance(to) => {
                let from = self.status;
                if !from.can_transition_to(to) {
                    return Err(OrderError::InvalidTransition { from, to });
                }
                self.status = to;
                Ok(OrderActionResult::Advance(StatusChange {
                    order_id: self.id.clone(),
                    user_id: self.user_id.clone(),
                    from,
                    to,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartItem, MenuItem};

    fn snapshot() -> OrderCreate {
        let item = |id: &str, price| MenuItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            description: String::new(),
            price,
            image: String::new(),
            category: "Snacks".to_string(),
            available: true,
        };
        OrderCreate {
            user_id: "client-1".to_string(),
            user_name: "Student 1".to_string(),
            roll_number: Some("21CS001".to_string()),
            items: vec![CartItem::new(item("a", 60), 2), CartItem::new(item("b", 30), 1)],
        }
    }

    #[test]
    fn test_created_pending_with_fixed_total() {
        let order = Order::from_create_params("order-1".to_string(), snapshot()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Completed);
        assert_eq!(order.total_amount, 150);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_empty_snapshot_rejected() {
        let mut params = snapshot();
        params.items.clear();
        assert_eq!(Order::from_create_params("order-1".to_string(), params), Err(OrderError::EmptyCart));
    }

    #[test]
    fn test_full_lifecycle() {
        let mut order = Order::from_create_params("order-1".to_string(), snapshot()).unwrap();
        for to in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Completed] {
            let OrderActionResult::Advance(change) = order.handle_action(OrderAction::Advance(to)).unwrap();
            assert_eq!(change.to, to);
            assert_eq!(change.notifies_customer(), to == OrderStatus::Ready);
        }
        assert_eq!(
            order.handle_action(OrderAction::Advance(OrderStatus::Cancelled)),
            Err(OrderError::InvalidTransition { from: OrderStatus::Completed, to: OrderStatus::Cancelled })
        );
    }

    #[test]
    fn test_skipping_ahead_rejected() {
        let mut order = Order::from_create_params("order-1".to_string(), snapshot()).unwrap();
        assert_eq!(
            order.handle_action(OrderAction::Advance(OrderStatus::Ready)),
            Err(OrderError::InvalidTransition { from: OrderStatus::Pending, to: OrderStatus::Ready })
        );
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
