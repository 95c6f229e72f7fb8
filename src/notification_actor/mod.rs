//! Notification center: messages addressed to a user or broadcast to a role.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
