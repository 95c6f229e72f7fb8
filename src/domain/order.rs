use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{total_price, CartItem, OrderStatus, PaymentStatus, User};

/// Represents a placed order.
///
/// `items` and `total_amount` are fixed at checkout; only `status` moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    pub items: Vec<CartItem>,
    pub status: OrderStatus,
    pub total_amount: u64,
    pub order_time: DateTime<Utc>,
    pub payment_status: PaymentStatus,
}

/// Params for creating a new order from a cart snapshot.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub user_name: String,
    pub roll_number: Option<String>,
    pub items: Vec<CartItem>,
}

impl OrderCreate {
    pub fn from_checkout(user: &User, items: Vec<CartItem>) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            roll_number: user.roll_number.clone(),
            items,
        }
    }

    pub fn total_amount(&self) -> u64 {
        total_price(&self.items)
    }
}

impl Order {
    /// Case-insensitive match against order id, customer name or roll number.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.id.to_lowercase().contains(&query)
            || self.user_name.to_lowercase().contains(&query)
            || self
                .roll_number
                .as_deref()
                .is_some_and(|roll| roll.to_lowercase().contains(&query))
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
