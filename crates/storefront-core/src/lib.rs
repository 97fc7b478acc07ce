//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate contains the cart math, pricing rules and validation for the
//! storefront as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-cli (commands)                       │   │
//! │  │    products, cart, add, remove, update, clear, checkout         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             storefront-store (CartStore + storage)              │   │
//! │  │     persisted slot • observers • best-effort persistence        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   order   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Pricing  │  │   │
//! │  │   │  TaxRate  │  │  display  │  │ CartLine  │  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart lines and derived totals
//! - [`order`] - Shipping, tax and order summary
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for cart and checkout
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, PricingPolicy, Product};
//!
//! let headphones = Product::new("1", "Wireless Headphones", Money::from_cents(19999));
//!
//! let mut cart = Cart::new();
//! cart.add(&headphones, 2);
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().cents(), 39998);
//!
//! let summary = PricingPolicy::default().summarize(&cart);
//! assert!(summary.shipping.is_zero()); // free over $50.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartRecord};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderSummary, PricingPolicy};
pub use types::{Product, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity a shopper may request for a single line.
///
/// Enforced by [`validation::validate_quantity`] at the edges (CLI, forms).
/// The cart itself accepts any positive quantity.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum length of a product identifier.
pub const MAX_PRODUCT_ID_LEN: usize = 64;

/// Default sales tax: 8%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Orders with a subtotal strictly above this ship free ($50.00).
pub const DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5_000;

/// Flat shipping fee below the free-shipping threshold ($9.99).
pub const DEFAULT_FLAT_SHIPPING_CENTS: i64 = 999;
