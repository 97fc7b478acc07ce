//! # Application Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConfigError ─────┐                                                     │
//! │  CoreError ───────┤                                                     │
//! │  ValidationError ─┼──► AppError ──► main: "error[CODE]: message"        │
//! │  CheckoutError ───┤                      exit status 1                  │
//! │  serde_json ──────┘                                                     │
//! │                                                                         │
//! │  StorageError never appears here: the cart store recovers from it.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Error returned from a command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl AppError {
    /// Machine-readable error code, printed alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Core(CoreError::ProductNotFound(_)) => "NOT_FOUND",
            AppError::Core(CoreError::OutOfStock { .. }) => "OUT_OF_STOCK",
            AppError::Core(CoreError::InvalidCartLine { .. }) => "INVALID_CART",
            AppError::Core(CoreError::Validation(_)) | AppError::Validation(_) => {
                "VALIDATION_ERROR"
            }
            AppError::Checkout(CheckoutError::Validation(_)) => "VALIDATION_ERROR",
            AppError::Checkout(_) => "CHECKOUT_ERROR",
            AppError::Output(_) => "INTERNAL",
        }
    }
}

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;
