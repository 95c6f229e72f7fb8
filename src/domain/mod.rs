pub mod cart;
pub mod menu_item;
pub mod notification;
pub mod order;
pub mod order_status;
pub mod stats;
pub mod user;

pub use cart::*;
pub use menu_item::*;
pub use notification::*;
pub use order::*;
pub use order_status::*;
pub use stats::*;
pub use user::*;
