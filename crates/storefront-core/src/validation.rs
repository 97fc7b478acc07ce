//! # Validation Module
//!
//! Input validation for cart requests and the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command line / form input                                    │
//! │  └── THIS MODULE: quantity bounds, ids, checkout fields                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart (storefront-core::cart)                                 │
//! │  ├── Non-positive add  → ignored                                       │
//! │  └── Non-positive update → remove                                      │
//! │                                                                         │
//! │  The cart never fails; anything worth refusing is refused here.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Product;
use crate::{MAX_ITEM_QUANTITY, MAX_PRODUCT_ID_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a requested quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product identifier.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_id;
///
/// assert!(validate_product_id("12").is_ok());
/// assert!(validate_product_id("  ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(())
}

/// Checks that `qty` of `product` may be added to a cart.
///
/// The resulting quantity in the cart is not capped here; callers that want
/// to cap the line should validate the merged quantity too.
pub fn validate_add_request(product: &Product, qty: i64) -> CoreResult<()> {
    validate_quantity(qty)?;

    if !product.in_stock {
        return Err(CoreError::OutOfStock {
            name: product.name.clone(),
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Form Validators
// =============================================================================

/// Validates that a field is non-empty after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// Deliberately loose: one `@`, a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email.trim().split_once('@').ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@example.com"));
    }

    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a US ZIP code: `12345` or `12345-6789`.
pub fn validate_zip_code(zip: &str) -> ValidationResult<()> {
    validate_required("zip code", zip)?;

    let zip = zip.trim();
    let (base, plus4) = match zip.split_once('-') {
        Some((base, plus4)) => (base, Some(plus4)),
        None => (zip, None),
    };

    let all_digits = |s: &str, len: usize| s.len() == len && s.chars().all(|c| c.is_ascii_digit());

    if !all_digits(base, 5) || plus4.is_some_and(|p| !all_digits(p, 4)) {
        return Err(ValidationError::InvalidFormat {
            field: "zip code".to_string(),
            reason: "must be 5 digits or ZIP+4".to_string(),
        });
    }

    Ok(())
}

/// Validates a card number: 13-19 digits (spaces and dashes ignored) that
/// pass the Luhn checksum.
///
/// ## Returns
/// The normalized digit string.
pub fn validate_card_number(number: &str) -> ValidationResult<String> {
    validate_required("card number", number)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "card number".to_string(),
        reason: reason.to_string(),
    };

    let digits: String = number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("must contain only digits"));
    }

    if !(13..=19).contains(&digits.len()) {
        return Err(invalid("must be 13 to 19 digits"));
    }

    if !luhn_valid(&digits) {
        return Err(invalid("checksum failed"));
    }

    Ok(digits)
}

/// Validates a card expiry in `MM/YY` form.
pub fn validate_expiry(expiry: &str) -> ValidationResult<()> {
    validate_required("expiry date", expiry)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "expiry date".to_string(),
        reason: "must be MM/YY".to_string(),
    };

    let (month, year) = expiry.trim().split_once('/').ok_or_else(invalid)?;
    if month.len() != 2 || year.len() != 2 {
        return Err(invalid());
    }

    let month: u32 = month.parse().map_err(|_| invalid())?;
    year.parse::<u32>().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "expiry month".to_string(),
            min: 1,
            max: 12,
        });
    }

    Ok(())
}

/// Validates a card security code: 3 or 4 digits.
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    validate_required("cvv", cvv)?;

    let cvv = cvv.trim();
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 or 4 digits".to_string(),
        });
    }

    Ok(())
}

fn luhn_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

// =============================================================================
// Unit Tests
// =============================================================================
