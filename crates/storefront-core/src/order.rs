//! # Order Pricing
//!
//! Turns a cart into the numbers shown on the cart and checkout pages.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order Summary                                                          │
//! │                                                                         │
//! │  Subtotal          $529.97    ◄── Cart::total()                         │
//! │  Shipping             Free    ◄── subtotal > $50.00 ? $0 : $9.99        │
//! │  Tax (8%)           $42.40    ◄── subtotal × rate, half-up to the cent  │
//! │  ───────────────────────────                                            │
//! │  Total             $572.37                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::TaxRate;

/// Shipping and tax rules applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    pub tax_rate: TaxRate,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    pub flat_shipping: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate: TaxRate::default(),
            free_shipping_threshold: Money::from_cents(crate::DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS),
            flat_shipping: Money::from_cents(crate::DEFAULT_FLAT_SHIPPING_CENTS),
        }
    }
}

impl PricingPolicy {
    /// Shipping charged for a given subtotal.
    ///
    /// An empty cart ships nothing and so costs nothing.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal.is_zero() || subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_shipping
        }
    }

    /// Prices a cart.
    ///
    /// The grand total saturates at the largest representable amount.
    pub fn summarize(&self, cart: &Cart) -> OrderSummary {
        let subtotal = cart.total();
        let shipping = self.shipping_for(subtotal);
        let tax = subtotal.calculate_tax(self.tax_rate);

        OrderSummary {
            item_count: cart.item_count(),
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }
}

/// The priced view of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Whether the shipping line should read "Free".
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
