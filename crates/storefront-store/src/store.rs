//! # Cart Store
//!
//! The single owned home of the session's cart.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Caller                    CartStore                  Side effects      │
//! │  ──────                    ─────────                  ────────────      │
//! │                                                                         │
//! │  add_to_cart(P, n) ──────► cart.add(P, n) ─────┐                        │
//! │  remove_from_cart(id) ───► cart.remove(id) ────┤                        │
//! │  update_quantity(id, n) ─► cart.update(id, n) ─┼──► 1. notify observers │
//! │  clear_cart() ───────────► cart.clear() ───────┘    2. persist slot     │
//! │                                                        (best effort)    │
//! │                                                                         │
//! │  cart() / get_item_quantity(id) ──► read only, no side effects          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! Storage failures are logged and swallowed. The in-memory cart is the
//! source of truth for the session; the slot only seeds the next one.

use std::fmt;
use std::sync::Arc;

use storefront_core::{Cart, CartRecord, Product};
use tracing::{debug, warn};

use crate::error::StorageResult;
use crate::storage::KeyValueStorage;
use crate::CART_KEY;

/// Callback invoked with the new cart after every mutation.
pub type Listener = Box<dyn FnMut(&Cart) + Send>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the cart, its observers and its persisted slot.
///
/// Construct one per session with [`CartStore::open`] and pass it to
/// whatever needs the cart. All operations take `&self` or `&mut self`, so
/// the borrow checker guarantees a single writer.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn KeyValueStorage>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Opens the store, reading the persisted slot exactly once.
    ///
    /// ## Startup Behavior
    /// ```text
    /// storage.get("cart")
    ///      │
    ///      ├── Ok(Some(json)) ── parses and fits? ── yes ──► restored cart
    ///      │                                      └─ no ───► empty cart + warn!
    ///      ├── Ok(None) ─────────────────────────► empty cart
    ///      └── Err(e) ───────────────────────────► empty cart + warn!
    /// ```
    ///
    /// Restored totals are recomputed from the persisted lines; a mismatch
    /// with the cached totals is logged.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let cart = restore(storage.as_ref());

        debug!(
            lines = cart.items().len(),
            item_count = cart.item_count(),
            total_cents = cart.total().cents(),
            "cart store opened"
        );

        CartStore {
            cart,
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Read-only snapshot of the current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Quantity of `product_id` in the cart, or 0.
    pub fn get_item_quantity(&self, product_id: &str) -> i64 {
        self.cart.quantity_of(product_id)
    }

    /// Adds one unit of `product`.
    pub fn add_one(&mut self, product: &Product) {
        self.add_to_cart(product, 1);
    }

    /// Adds `quantity` units of `product`, merging with an existing line.
    ///
    /// A non-positive quantity is ignored: nothing changes, nobody is
    /// notified, nothing is written. The same holds for an add the cart
    /// refuses (negative price, or totals that would overflow).
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) {
        if quantity <= 0 {
            warn!(product_id = %product.id, quantity, "ignoring add with non-positive quantity");
            return;
        }
        if !self.cart.add(product, quantity) {
            warn!(product_id = %product.id, quantity, "cart refused add; totals would overflow or price is negative");
            return;
        }

        debug!(product_id = %product.id, quantity, "added to cart");
        self.commit();
    }

    /// Removes the line for `product_id`. Absent ids are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        match self.cart.remove(product_id) {
            Some(line) => debug!(product_id, quantity = line.quantity, "removed from cart"),
            None => debug!(product_id, "remove: product not in cart"),
        }
        self.commit();
    }

    /// Sets the absolute quantity for `product_id`.
    ///
    /// `quantity <= 0` is handled by [`CartStore::remove_from_cart`]. Ids not
    /// in the cart are a no-op; no line is created. A quantity whose totals
    /// would overflow is refused without notifying or writing.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        if self.cart.line(product_id).is_none() {
            debug!(product_id, "update: product not in cart");
        } else if self.cart.update_quantity(product_id, quantity) {
            debug!(product_id, quantity, "updated quantity");
        } else {
            warn!(product_id, quantity, "cart refused update; totals would overflow");
            return;
        }
        self.commit();
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("cleared cart");
        self.commit();
    }

    /// Registers a callback that runs after every mutation.
    ///
    /// Callbacks run synchronously, in registration order, before the cart
    /// is persisted.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Cart) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.cart);
        }

        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist cart; keeping in-memory state");
        }
    }

    fn persist(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.cart)?;
        self.storage.set(CART_KEY, &json)
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

fn restore(storage: &dyn KeyValueStorage) -> Cart {
    let json = match storage.get(CART_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(error = %e, "could not read persisted cart; starting empty");
            return Cart::new();
        }
    };

    let record = match serde_json::from_str::<CartRecord>(&json) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "persisted cart is corrupt; starting empty");
            return Cart::new();
        }
    };

    let stale = !record.totals_match();
    let (cached_item_count, cached_total) = (record.item_count, record.total);

    match Cart::try_from(record) {
        Ok(cart) => {
            if stale {
                warn!(
                    cached_item_count,
                    cached_total_cents = cached_total.cents(),
                    "persisted cart totals were stale; recomputed from lines"
                );
            }
            cart
        }
        Err(e) => {
            warn!(error = %e, "persisted cart is corrupt; starting empty");
            Cart::new()
        }
    }
}
