//! # Checkout
//!
//! Simulated checkout: validate the form, pretend to charge the card, hand
//! back a confirmation. No payment processor is contacted.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(cart, details)                                             │
//! │       │                                                                 │
//! │       ├── cart empty? ─────────────────► EmptyCart                      │
//! │       ├── form invalid? ───────────────► Validation([...])              │
//! │       ├── another order in flight? ────► AlreadyProcessing              │
//! │       │                                                                 │
//! │       ├── sleep(checkout_delay)          (processing flag held)         │
//! │       │                                                                 │
//! │       └── OrderConfirmation { order_id, summary, lines, ... }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clearing the cart after a successful order is the caller's job.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::validation::{
    validate_card_number, validate_cvv, validate_email, validate_expiry, validate_required,
    validate_zip_code,
};
use storefront_core::{Cart, CartLine, OrderSummary, PricingPolicy, ValidationError};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Checkout form is invalid: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("An order is already being processed")]
    AlreadyProcessing,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Everything the checkout form collects.
#[derive(Debug, Clone, Default)]
pub struct CheckoutDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl CheckoutDetails {
    /// Validates every field, collecting all failures.
    ///
    /// ## Returns
    /// The last four card digits on success.
    pub fn validate(&self) -> Result<String, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
        ];
        for (field, value) in required {
            if let Err(e) = validate_required(field, value) {
                errors.push(e);
            }
        }

        for result in [
            validate_email(&self.email),
            validate_zip_code(&self.zip_code),
            validate_expiry(&self.expiry_date),
            validate_cvv(&self.cvv),
        ] {
            if let Err(e) = result {
                errors.push(e);
            }
        }

        let last4 = match validate_card_number(&self.card_number) {
            Ok(digits) => digits[digits.len() - 4..].to_string(),
            Err(e) => {
                errors.push(e);
                String::new()
            }
        };

        if errors.is_empty() {
            Ok(last4)
        } else {
            Err(errors)
        }
    }
}

/// What the shopper sees after paying.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub email: String,
    pub shipping_address: String,
    pub card_last4: String,
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
}

/// Places orders, one at a time.
#[derive(Debug)]
pub struct CheckoutService {
    pricing: PricingPolicy,
    delay: Duration,
    processing: AtomicBool,
}

/// Releases the processing flag when dropped.
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CheckoutService {
    pub fn new(pricing: PricingPolicy, delay: Duration) -> Self {
        CheckoutService {
            pricing,
            delay,
            processing: AtomicBool::new(false),
        }
    }

    /// Whether an order is currently being processed.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Validates and "charges" an order for `cart`.
    pub async fn place_order(
        &self,
        cart: &Cart,
        details: &CheckoutDetails,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let card_last4 = details.validate().map_err(CheckoutError::Validation)?;

        let _guard = self.claim()?;
        let summary = self.pricing.summarize(cart);

        debug!(delay_ms = self.delay.as_millis() as u64, "processing payment");
        tokio::time::sleep(self.delay).await;

        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            customer_name: format!("{} {}", details.first_name.trim(), details.last_name.trim()),
            email: details.email.trim().to_string(),
            shipping_address: format!(
                "{}, {}, {} {}",
                details.address.trim(),
                details.city.trim(),
                details.state.trim(),
                details.zip_code.trim()
            ),
            card_last4,
            lines: cart.items().to_vec(),
            summary,
        };

        info!(
            order_id = %confirmation.order_id,
            item_count = summary.item_count,
            total_cents = summary.total.cents(),
            "order placed"
        );
        Ok(confirmation)
    }

    fn claim(&self) -> Result<ProcessingGuard<'_>, CheckoutError> {
        self.processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!("rejected checkout while another order is processing");
                CheckoutError::AlreadyProcessing
            })?;
        Ok(ProcessingGuard(&self.processing))
    }
}
