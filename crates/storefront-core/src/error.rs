//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog / cart rule violations                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-store errors (separate crate)                              │
//! │  └── StorageError     - Persisted slot read/write failures             │
//! │                         (recovered inside the store, never surfaced)   │
//! │                                                                         │
//! │  storefront-cli errors (app)                                           │
//! │  └── AppError         - What the command line prints                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Removing or updating a product that is not in the cart is NOT an error:
//! those operations are no-ops. Errors here cover requests the storefront
//! refuses before they reach the cart.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is flagged out of stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Product card: "Coffee Maker"  [Out of Stock]
    ///      │
    ///      ▼
    /// add 4 ──► OutOfStock { name: "Coffee Maker" }
    /// ```
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// A persisted cart line cannot be part of a valid cart: its unit price
    /// is negative, or the cart's totals would not fit in an `i64`.
    #[error("Invalid cart line for product {product_id}")]
    InvalidCartLine { product_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, bad card number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
