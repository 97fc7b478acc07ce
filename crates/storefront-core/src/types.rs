//! # Domain Types
//!
//! Catalog-side types used throughout the storefront.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐
//! │    Product      │   │    TaxRate      │
//! │  ─────────────  │   │  ─────────────  │
//! │  id (string)    │   │  bps (u32)      │
//! │  name           │   │  800 = 8%       │
//! │  price_cents    │   └─────────────────┘
//! │  category       │
//! │  in_stock       │
//! └─────────────────┘
//! ```
//!
//! Products are supplied by the catalog already validated. The cart embeds a
//! full copy of the product in each line, so a persisted cart can be
//! displayed without consulting the catalog.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    ///
    /// The percentage is clamped to 0-100; NaN becomes 0. Callers that must
    /// reject out-of-range input check it before converting.
    pub fn from_percentage(pct: f64) -> Self {
        if pct.is_nan() {
            return TaxRate::zero();
        }
        TaxRate((pct.clamp(0.0, 100.0) * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Marketing copy shown on the product card.
    pub description: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Image URL.
    pub image: String,

    /// Catalog category ("Electronics", "Sports", ...).
    pub category: String,

    /// Whether the product can currently be added to a cart.
    pub in_stock: bool,

    /// Average review score out of 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    /// Number of reviews behind `rating`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
}

impl Product {
    /// Creates an in-stock product with empty descriptive fields.
    ///
    /// Handy for tests and for callers that only care about id and price.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price_cents: price.cents(),
            image: String::new(),
            category: String::new(),
            in_stock: true,
            rating: None,
            reviews: None,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
