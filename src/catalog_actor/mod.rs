//! Menu catalog: the orderable items for a session.

pub mod entity;
pub mod error;
mod seed;

pub use error::*;
pub use seed::sample_menu;
