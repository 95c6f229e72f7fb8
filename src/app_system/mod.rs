//! System orchestration, configuration, startup, and shutdown logic.

pub mod cafe_system;
pub mod config;
pub mod error;
pub mod telemetry;

pub use cafe_system::*;
pub use config::*;
pub use error::*;
pub use telemetry::*;
