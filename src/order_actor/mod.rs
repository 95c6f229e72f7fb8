//! Order ledger: placed orders and the status state machine that governs them.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
