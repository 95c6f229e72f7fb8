//! # Cafe Orders
//!
//! Order lifecycle and notification engine for a campus cafeteria.
//!
//! Four services run as tokio actors and are reached through cloneable clients:
//!
//! - **Catalog** - menu items, search, categories → [`CatalogClient`]
//! - **Cart** - per-device cart, persisted after every change → [`CartClient`]
//! - **Order ledger** - placement and the status lifecycle → [`OrderClient`]
//! - **Notification center** - role broadcasts and direct notices → [`NotificationClient`]
//!
//! [`CafeSystem`] owns all of them together with the [`Session`], restores
//! persisted state at startup and shuts everything down in dependency order.
//!
//! ```no_run
//! use cafe_orders::{CafeConfig, CafeSystem, Credentials};
//!
//! # async fn run() -> Result<(), cafe_orders::SystemError> {
//! let system = CafeSystem::start(&CafeConfig::from_env()).await?;
//! system
//!     .session
//!     .login(Credentials::Client {
//!         roll_number: "21CS001".into(),
//!         phone_number: "9876543210".into(),
//!     })
//!     .await?;
//! system.add_to_cart("1").await?;
//! let order_id = system.checkout().await?;
//! # let _ = order_id;
//! system.shutdown().await
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod cart_actor;
pub mod catalog_actor;
pub mod clients;
pub mod domain;
pub mod messages;
pub mod notification_actor;
pub mod order_actor;
pub mod pending;
pub mod session;
pub mod storage;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, CafeConfig, CafeSystem, SystemError};
pub use clients::{CartClient, CatalogClient, NotificationClient, OrderClient};
pub use domain::*;
pub use session::{Session, SessionError};
