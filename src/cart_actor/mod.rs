//! The current session's cart, persisted on every change.

pub mod error;
mod service;

pub use error::*;
pub use service::CartService;
