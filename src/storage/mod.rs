//! Durable key-value persistence for the session record and the cart.
//!
//! Values are JSON strings; typed helpers [`load_json`] and [`save_json`]
//! sit on top of the raw [`KeyValueStore`] trait.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the signed-in user record.
pub const SESSION_KEY: &str = "cafe_user";
/// Key holding the cart entries.
pub const CART_KEY: &str = "cafe_cart";

/// A string key-value store that survives process restarts.
///
/// All methods take `&self` so implementations can be shared behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Retrieves the value stored at `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` at `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.put(key, &raw)
}
