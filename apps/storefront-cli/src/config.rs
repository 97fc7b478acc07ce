//! # Configuration
//!
//! Storefront settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! ## Environment Variables
//! - `STOREFRONT_DATA_DIR` - Directory holding `cart.json`
//! - `STOREFRONT_TAX_RATE` - Sales tax percentage (e.g. `8` or `8.25`)
//! - `STOREFRONT_FREE_SHIPPING_THRESHOLD_CENTS` - Subtotals above this ship free
//! - `STOREFRONT_FLAT_SHIPPING_CENTS` - Shipping below the threshold
//! - `STOREFRONT_CHECKOUT_DELAY_MS` - Simulated payment processing time

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use storefront_core::{Money, PricingPolicy, TaxRate};
use thiserror::Error;

/// Default simulated payment processing time.
pub const DEFAULT_CHECKOUT_DELAY: Duration = Duration::from_secs(3);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {var}: {reason}")]
    InvalidEnvVar { var: &'static str, reason: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where the persisted cart lives.
    pub data_dir: PathBuf,

    /// Shipping and tax rules.
    pub pricing: PricingPolicy,

    /// How long checkout pretends to talk to a payment processor.
    pub checkout_delay: Duration,
}

impl Default for StorefrontConfig {
    /// ## Default Values
    /// - Data dir: platform data directory (`~/.local/share/storefront` on Linux)
    /// - Tax: 8%
    /// - Shipping: free over $50.00, otherwise $9.99
    /// - Checkout delay: 3 seconds
    fn default() -> Self {
        StorefrontConfig {
            data_dir: default_data_dir(),
            pricing: PricingPolicy::default(),
            checkout_delay: DEFAULT_CHECKOUT_DELAY,
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults; set but unparseable variables
    /// are errors rather than silently ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StorefrontConfig::default();

        if let Some(dir) = lookup("STOREFRONT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("STOREFRONT_TAX_RATE") {
            let pct: f64 = parse("STOREFRONT_TAX_RATE", &raw)?;
            if !(0.0..=100.0).contains(&pct) {
                return Err(ConfigError::InvalidEnvVar {
                    var: "STOREFRONT_TAX_RATE",
                    reason: "must be a percentage between 0 and 100".to_string(),
                });
            }
            config.pricing.tax_rate = TaxRate::from_percentage(pct);
        }

        if let Some(raw) = lookup("STOREFRONT_FREE_SHIPPING_THRESHOLD_CENTS") {
            config.pricing.free_shipping_threshold =
                parse_cents("STOREFRONT_FREE_SHIPPING_THRESHOLD_CENTS", &raw)?;
        }

        if let Some(raw) = lookup("STOREFRONT_FLAT_SHIPPING_CENTS") {
            config.pricing.flat_shipping = parse_cents("STOREFRONT_FLAT_SHIPPING_CENTS", &raw)?;
        }

        if let Some(raw) = lookup("STOREFRONT_CHECKOUT_DELAY_MS") {
            let ms: u64 = parse("STOREFRONT_CHECKOUT_DELAY_MS", &raw)?;
            config.checkout_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
        var,
        reason: e.to_string(),
    })
}

fn parse_cents(var: &'static str, raw: &str) -> Result<Money, ConfigError> {
    let cents: i64 = parse(var, raw)?;
    let money = Money::from_cents(cents);
    if money.is_negative() {
        return Err(ConfigError::InvalidEnvVar {
            var,
            reason: "must not be negative".to_string(),
        });
    }
    Ok(money)
}

/// Platform data directory, or `./.storefront` when none can be determined.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".storefront"))
}
