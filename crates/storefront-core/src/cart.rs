//! # Cart
//!
//! The shopping cart: ordered lines plus totals derived from them.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  add(P, n)            ── line for P? ── yes ──► line.qty += n           │
//! │                                      └─ no ───► push (P, n)             │
//! │                                                                         │
//! │  update_quantity(P, n) ── n <= 0 ──────────────► remove(P)              │
//! │                        └─ line for P? ── yes ──► line.qty = n           │
//! │                                       └─ no ───► (nothing)              │
//! │                                                                         │
//! │  remove(P)            ── drop line for P, if any                        │
//! │  clear()              ── no lines                                       │
//! │                                                                         │
//! │  Every operation ends in recompute(): item_count and total are never    │
//! │  written anywhere else. An add or update whose totals would overflow    │
//! │  is refused and rolled back.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has quantity > 0 and a non-negative unit price
//! - `item_count` = Σ quantity, `total` = Σ quantity × unit price, both
//!   representable as `i64`

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart and how many of it.
///
/// The product is a frozen snapshot taken when the line was created, so the
/// cart keeps displaying (and pricing) what the shopper saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    /// Unit price × quantity.
    ///
    /// Cannot overflow for a line held by a [`Cart`].
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }

    /// Unit price × quantity, or `None` on overflow.
    pub fn checked_line_total(&self) -> Option<Money> {
        self.product.price().checked_multiply_quantity(self.quantity)
    }
}

/// Item count and total of `lines`, or `None` if either overflows.
fn totals_of(lines: &[CartLine]) -> Option<(i64, Money)> {
    lines
        .iter()
        .try_fold((0i64, Money::zero()), |(count, total), line| {
            Some((
                count.checked_add(line.quantity)?,
                total.checked_add(line.checked_line_total()?)?,
            ))
        })
}

// =============================================================================
// Cart Record
// =============================================================================

/// The serialized shape of a cart, totals as cached by whoever wrote it.
///
/// Deserializing a [`Cart`] goes through this type and always recomputes the
/// totals. Callers that want to know whether the cached totals were stale
/// can deserialize a `CartRecord` first and ask [`CartRecord::totals_match`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartRecord {
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub item_count: i64,
    #[serde(default)]
    pub total: Money,
}

impl CartRecord {
    /// Returns true when the cached totals agree with the lines.
    ///
    /// Lines whose totals overflow never match.
    pub fn totals_match(&self) -> bool {
        totals_of(&self.items) == Some((self.item_count, self.total))
    }
}

impl TryFrom<CartRecord> for Cart {
    type Error = CoreError;

    /// Rebuilds a cart from its record, recomputing the totals.
    ///
    /// Lines are replayed through [`Cart::add`]: duplicate product ids merge
    /// and non-positive quantities are dropped. A line with a negative price,
    /// or one that would overflow the totals, fails the whole record.
    fn try_from(record: CartRecord) -> CoreResult<Self> {
        let mut cart = Cart::new();
        for line in record.items {
            if line.quantity <= 0 {
                continue;
            }
            if !cart.add(&line.product, line.quantity) {
                return Err(CoreError::InvalidCartLine {
                    product_id: line.product.id,
                });
            }
        }
        Ok(cart)
    }
}

impl From<&Cart> for CartRecord {
    fn from(cart: &Cart) -> Self {
        CartRecord {
            items: cart.items.clone(),
            item_count: cart.item_count,
            total: cart.total,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Fields are private: the derived totals can only change through the
/// operations below, each of which recomputes them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CartRecord")]
pub struct Cart {
    items: Vec<CartLine>,
    item_count: i64,
    total: Money,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds `quantity` of a product, merging into an existing line.
    ///
    /// ## Returns
    /// `false` (and leaves the cart untouched) when `quantity <= 0`, when the
    /// product has a negative price, or when the new totals would overflow.
    pub fn add(&mut self, product: &Product, quantity: i64) -> bool {
        if quantity <= 0 || product.price().is_negative() {
            return false;
        }

        let previous = self.quantity_of(&product.id);
        let Some(merged) = previous.checked_add(quantity) else {
            return false;
        };

        match self.line_mut(&product.id) {
            Some(line) => line.quantity = merged,
            None => self.items.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }

        if self.recompute() {
            return true;
        }

        // Roll back to the previous, valid state.
        if previous == 0 {
            self.items.pop();
        } else if let Some(line) = self.line_mut(&product.id) {
            line.quantity = previous;
        }
        false
    }

    /// Removes the line for `product_id`, returning it if it was present.
    pub fn remove(&mut self, product_id: &str) -> Option<CartLine> {
        let index = self.items.iter().position(|l| l.product.id == product_id)?;
        let removed = self.items.remove(index);
        // Fewer lines of non-negative totals cannot overflow.
        self.recompute();
        Some(removed)
    }

    /// Sets the absolute quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove`]
    /// - Product not in cart: nothing happens (no line is created)
    ///
    /// - New totals would overflow: nothing happens
    ///
    /// ## Returns
    /// `true` if a line was changed or removed.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id).is_some();
        }

        let Some(line) = self.line_mut(product_id) else {
            return false;
        };
        let previous = std::mem::replace(&mut line.quantity, quantity);

        if self.recompute() {
            return true;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = previous;
        }
        false
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    /// Quantity of `product_id` in the cart, or 0.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// The line for `product_id`, if any.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.items.iter().find(|l| l.product.id == product_id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.items.iter_mut().find(|l| l.product.id == product_id)
    }

    /// Refreshes the derived totals. Returns `false`, leaving the old totals
    /// in place, when the lines overflow them.
    fn recompute(&mut self) -> bool {
        match totals_of(&self.items) {
            Some((item_count, total)) => {
                self.item_count = item_count;
                self.total = total;
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
    }

    fn headphones() -> Product {
        product("1", 19999)
    }

    fn shoes() -> Product {
        product("3", 12999)
    }

    fn assert_totals_consistent(cart: &Cart) {
        let count: i64 = cart.items().iter().map(|l| l.quantity).sum();
        let total: i64 = cart
            .items()
            .iter()
            .map(|l| l.quantity * l.product.price_cents)
            .sum();
        assert_eq!(cart.item_count(), count);
        assert_eq!(cart.total().cents(), total);
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);
        cart.add(&headphones(), 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("1"), 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_twice_equals_add_once_with_sum() {
        let mut twice = Cart::new();
        twice.add(&headphones(), 1);
        twice.add(&headphones(), 1);

        let mut once = Cart::new();
        once.add(&headphones(), 2);

        assert_eq!(twice, once);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 1);
        let before = cart.clone();

        assert!(!cart.add(&shoes(), 0));
        assert!(!cart.add(&headphones(), -4));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&shoes(), 1);
        cart.add(&headphones(), 1);
        cart.add(&shoes(), 1);

        let ids: Vec<&str> = cart.items().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);
        cart.add(&shoes(), 4);

        assert!(cart.update_quantity("3", 0));
        assert_eq!(cart.quantity_of("3"), 0);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_update_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);

        assert!(cart.update_quantity("1", -1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_is_absolute() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);

        cart.update_quantity("1", 7);
        assert_eq!(cart.quantity_of("1"), 7);
        assert_eq!(cart.total().cents(), 7 * 19999);
    }

    #[test]
    fn test_update_missing_product_does_not_create_line() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 1);
        let before = cart.clone();

        assert!(!cart.update_quantity("99", 3));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_missing_product_is_byte_identical() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);
        cart.add(&shoes(), 1);
        let before = serde_json::to_string(&cart).unwrap();

        assert!(cart.remove("does-not-exist").is_none());
        assert_eq!(serde_json::to_string(&cart).unwrap(), before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of("1"), 0);
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_checkout_scenario_totals() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);
        cart.add(&shoes(), 1);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Money::from_cents(52997));

        cart.update_quantity("1", 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Money::from_cents(32998));

        cart.remove("3");
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Money::from_cents(19999));
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["itemCount"], 2);
        assert_eq!(json["total"], 39998);
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["product"]["id"], "1");
    }

    #[test]
    fn test_deserialize_recomputes_stale_totals() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);

        let mut json = serde_json::to_value(&cart).unwrap();
        json["itemCount"] = 42.into();
        json["total"] = 1.into();

        let record: CartRecord = serde_json::from_value(json.clone()).unwrap();
        assert!(!record.totals_match());

        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_deserialize_merges_duplicate_lines() {
        let line = CartLine {
            product: headphones(),
            quantity: 1,
        };
        let record = CartRecord {
            items: vec![line.clone(), line],
            item_count: 2,
            total: Money::from_cents(39998),
        };

        let cart = Cart::try_from(record).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("1"), 2);
    }

    #[test]
    fn test_add_refuses_overflowing_quantity() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);
        let before = cart.clone();

        assert!(!cart.add(&headphones(), i64::MAX / 19999));
        assert!(!cart.add(&shoes(), i64::MAX / 12999 + 1));
        assert!(!cart.add(&product("z", 0), i64::MAX));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_refuses_negative_price() {
        let mut cart = Cart::new();
        assert!(!cart.add(&product("refund", -500), 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_refuses_overflowing_quantity() {
        let mut cart = Cart::new();
        cart.add(&headphones(), 2);
        cart.add(&shoes(), 1);
        let before = cart.clone();

        assert!(!cart.update_quantity("1", i64::MAX));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_overflowing_record_is_rejected() {
        let record = CartRecord {
            items: vec![CartLine {
                product: headphones(),
                quantity: i64::MAX,
            }],
            item_count: i64::MAX,
            total: Money::zero(),
        };
        assert!(!record.totals_match());
        assert!(matches!(
            Cart::try_from(record.clone()),
            Err(CoreError::InvalidCartLine { ref product_id }) if product_id == "1"
        ));

        let json = serde_json::to_string(&record).unwrap();
        assert!(serde_json::from_str::<Cart>(&json).is_err());
    }

    #[test]
    fn test_record_drops_non_positive_lines() {
        let record = CartRecord {
            items: vec![
                CartLine {
                    product: headphones(),
                    quantity: 0,
                },
                CartLine {
                    product: shoes(),
                    quantity: 1,
                },
            ],
            item_count: 1,
            total: Money::from_cents(12999),
        };

        let cart = Cart::try_from(record).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("3"), 1);
    }

    #[test]
    fn test_record_from_cart_matches() {
        let mut cart = Cart::new();
        cart.add(&shoes(), 3);
        assert!(CartRecord::from(&cart).totals_match());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, i64),
        Remove(usize),
        Update(usize, i64),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..4usize, 1..10i64).prop_map(|(p, q)| Op::Add(p, q)),
            2 => (0..4usize).prop_map(Op::Remove),
            2 => (0..4usize, -2..10i64).prop_map(|(p, q)| Op::Update(p, q)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_totals_track_every_mutation(ops in proptest::collection::vec(op(), 0..40)) {
            let catalog = [
                product("a", 19999),
                product("b", 12999),
                product("c", 2499),
                product("d", 0),
            ];
            let mut cart = Cart::new();
            let mut expected = [0i64; 4];

            for op in ops {
                match op {
                    Op::Add(p, q) => {
                        cart.add(&catalog[p], q);
                        expected[p] += q;
                    }
                    Op::Remove(p) => {
                        cart.remove(&catalog[p].id);
                        expected[p] = 0;
                    }
                    Op::Update(p, q) => {
                        let present = expected[p] > 0;
                        cart.update_quantity(&catalog[p].id, q);
                        if q <= 0 {
                            expected[p] = 0;
                        } else if present {
                            expected[p] = q;
                        }
                    }
                    Op::Clear => {
                        cart.clear();
                        expected = [0; 4];
                    }
                }

                assert_totals_consistent(&cart);
                prop_assert_eq!(cart.item_count(), expected.iter().sum::<i64>());
                for (i, p) in catalog.iter().enumerate() {
                    prop_assert_eq!(cart.quantity_of(&p.id), expected[i]);
                }
            }
        }
    }
}
