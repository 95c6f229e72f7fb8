//! Cloneable handles for talking to the services.

#[macro_use]
mod macros;

mod cart_client;
mod catalog_client;
mod notification_client;
mod order_client;

pub use cart_client::CartClient;
pub use catalog_client::CatalogClient;
pub use notification_client::NotificationClient;
pub use order_client::OrderClient;
