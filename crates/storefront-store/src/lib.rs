//! # storefront-store: Cart Store & Persistence
//!
//! Owns the session's cart and keeps a durable copy of it.
//!
//! ## Module Organization
//! ```text
//! storefront_store/
//! ├── lib.rs          ◄─── You are here (exports, slot key)
//! ├── store.rs        ◄─── CartStore: operations, observers, persistence
//! ├── storage/
//! │   ├── mod.rs      ◄─── KeyValueStorage trait
//! │   ├── memory.rs   ◄─── MemoryStorage
//! │   └── json_file.rs◄─── JsonFileStorage
//! └── error.rs        ◄─── StorageError
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use storefront_core::{Money, Product};
//! use storefront_store::{CartStore, MemoryStorage};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let mut store = CartStore::open(storage.clone());
//!
//! let shoes = Product::new("3", "Running Shoes", Money::from_cents(12999));
//! store.add_to_cart(&shoes, 2);
//! assert_eq!(store.get_item_quantity("3"), 2);
//!
//! // A fresh store over the same storage sees the same cart.
//! let reopened = CartStore::open(storage);
//! assert_eq!(reopened.cart(), store.cart());
//! ```

pub mod error;
pub mod storage;
mod store;

pub use error::{StorageError, StorageResult};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use store::{CartStore, Listener, SubscriptionId};

/// Storage key of the persisted cart slot.
pub const CART_KEY: &str = "cart";
