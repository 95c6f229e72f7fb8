use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Role, User};

/// Who a notification is addressed to.
///
/// A role recipient is a broadcast: every user holding that role sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Recipient {
    User(String),
    Role(Role),
}

impl Recipient {
    pub fn includes(&self, user: &User) -> bool {
        match self {
            Recipient::User(id) => *id == user.id,
            Recipient::Role(role) => *role == user.role,
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::User(id) => write!(f, "user:{id}"),
            Recipient::Role(role) => write!(f, "role:{role}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    OrderPlaced,
    OrderReady,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub recipient: Recipient,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Params for creating a notification.
#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub recipient: Recipient,
    pub message: String,
    pub kind: NotificationType,
    pub order_id: Option<String>,
}

impl NotificationCreate {
    pub fn order_placed(order_id: &str, customer_name: &str) -> Self {
        Self {
            recipient: Recipient::Role(Role::Cafeteria),
            message: format!("New order #{order_id} received from {customer_name}"),
            kind: NotificationType::OrderPlaced,
            order_id: Some(order_id.to_string()),
        }
    }

    pub fn order_ready(order_id: &str, user_id: &str) -> Self {
        Self {
            recipient: Recipient::User(user_id.to_string()),
            message: format!("Your order #{order_id} is ready for pickup!"),
            kind: NotificationType::OrderReady,
            order_id: Some(order_id.to_string()),
        }
    }

    pub fn system(recipient: Recipient, message: impl Into<String>) -> Self {
        Self {
            recipient,
            message: message.into(),
            kind: NotificationType::System,
            order_id: None,
        }
    }
}

impl Notification {
    pub fn is_visible_to(&self, user: &User) -> bool {
        self.recipient.includes(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_broadcast_reaches_every_holder() {
        let staff_a = User::new("cafeteria-a", "Cafeteria Staff", Role::Cafeteria, "0000000000");
        let staff_b = User::new("cafeteria-b", "Cafeteria Staff", Role::Cafeteria, "0000000000");
        let client = User::new("client-1", "Student 1", Role::Client, "1");

        let broadcast = Recipient::Role(Role::Cafeteria);
        assert!(broadcast.includes(&staff_a));
        assert!(broadcast.includes(&staff_b));
        assert!(!broadcast.includes(&client));

        let direct = Recipient::User("client-1".to_string());
        assert!(direct.includes(&client));
        assert!(!direct.includes(&staff_a));
    }

    #[test]
    fn test_messages() {
        let placed = NotificationCreate::order_placed("order-7", "Student 21CS001");
        assert_eq!(placed.message, "New order #order-7 received from Student 21CS001");
        assert_eq!(placed.recipient, Recipient::Role(Role::Cafeteria));

        let ready = NotificationCreate::order_ready("order-7", "client-1");
        assert_eq!(ready.message, "Your order #order-7 is ready for pickup!");
        assert_eq!(ready.kind, NotificationType::OrderReady);
    }
}
