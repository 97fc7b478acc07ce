//! Key-value storage backends for the persisted cart.
//!
//! A **storage** is a tiny durable map from string keys to string values,
//! the same shape as a browser's local storage. The [`CartStore`] owns one
//! slot in it (see [`CART_KEY`]) and overwrites that slot after every
//! mutation.
//!
//! ## Provided backends
//! - [`MemoryStorage`]: non-persistent (tests, throwaway sessions).
//! - [`JsonFileStorage`]: one `<key>.json` file per key in a data directory.
//!
//! ## Expectations
//! - Implementations must be `Send + Sync`.
//! - `get` of a key that was never written returns `Ok(None)`, not an error.
//! - `set` replaces the previous value wholesale.
//!
//! [`CartStore`]: crate::CartStore
//! [`CART_KEY`]: crate::CART_KEY

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageResult;

/// A durable string-to-string map.
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Removing a key that does not exist is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
