use std::fmt;

use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// Roles a signed-in user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Admin,
    Cafeteria,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Admin => "admin",
            Role::Cafeteria => "cafeteria",
        }
    }

    /// Whether this role works behind the counter.
    pub const fn is_staff(self) -> bool {
        match self {
            Role::Client => false,
            Role::Admin | Role::Cafeteria => true,
        }
    }

    /// Which status changes this role may request.
    ///
    /// Staff move orders through the kitchen and may cancel them; a client
    /// may only confirm pickup. Legality of the edge itself is checked by the
    /// order ledger regardless of who asks.
    pub const fn may_set_status(self, to: OrderStatus) -> bool {
        match self {
            Role::Client => matches!(to, OrderStatus::Completed),
            Role::Admin | Role::Cafeteria => matches!(
                to,
                OrderStatus::Preparing | OrderStatus::Ready | OrderStatus::Cancelled
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The acting identity handed to the core by the session layer.
///
/// Serialized as the persisted session record `{id, name, role, rollNumber?, phoneNumber}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    pub phone_number: String,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `id` - Opaque user id
    /// * `name` - Display name shown on orders
    /// * `role` - Role used for notification routing and authorization
    /// * `phone_number` - Contact number
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            roll_number: None,
            phone_number: phone_number.into(),
        }
    }

    pub fn with_roll_number(mut self, roll_number: impl Into<String>) -> Self {
        self.roll_number = Some(roll_number.into());
        self
    }
}

/// Login form input, one shape per role.
#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    Client { roll_number: String, phone_number: String },
    Admin { username: String, password: String },
    Cafeteria { username: String, password: String },
}

impl Credentials {
    pub const fn role(&self) -> Role {
        match self {
            Credentials::Client { .. } => Role::Client,
            Credentials::Admin { .. } => Role::Admin,
            Credentials::Cafeteria { .. } => Role::Cafeteria,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_record_layout() {
        let user = User::new("client-abc", "Student 21CS001", Role::Client, "9876543210")
            .with_roll_number("21CS001");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["role"], "client");
        assert_eq!(json["rollNumber"], "21CS001");
        assert_eq!(json["phoneNumber"], "9876543210");

        let staff = User::new("admin-1", "Admin User", Role::Admin, "0000000000");
        let json = serde_json::to_value(&staff).unwrap();
        assert!(json.get("rollNumber").is_none());
    }

    #[test]
    fn test_staff_permissions() {
        assert!(Role::Cafeteria.may_set_status(OrderStatus::Ready));
        assert!(Role::Admin.may_set_status(OrderStatus::Cancelled));
        assert!(!Role::Admin.may_set_status(OrderStatus::Completed));
        assert!(Role::Client.may_set_status(OrderStatus::Completed));
        assert!(!Role::Client.may_set_status(OrderStatus::Preparing));
        assert!(!Role::Client.is_staff());
    }
}
