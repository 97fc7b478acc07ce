//! # Storefront CLI
//!
//! Command-line front end for the demo storefront.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          storefront (binary)                            │
//! │                                                                         │
//! │   clap Cli ──► StorefrontConfig ──► Context ──► commands::execute       │
//! │                 (env + flags)        │                                  │
//! │                                      ├── Catalog (demo products)        │
//! │                                      ├── CartStore ◄── JsonFileStorage  │
//! │                                      └── CheckoutService                │
//! │                                                                         │
//! │   stdout: command output            stderr: tracing logs               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`catalog`] - Fixed demo product list
//! - [`checkout`] - Form validation and simulated order placement
//! - [`commands`] - clap definitions and command handlers
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Application error type

pub mod catalog;
pub mod checkout;
pub mod commands;
pub mod config;
pub mod error;

use std::sync::Arc;

use storefront_store::JsonFileStorage;
use tracing::debug;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, Context};
use crate::config::StorefrontConfig;
use crate::error::AppResult;

/// Log filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn,storefront_cli=info,storefront_store=info";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Logs go to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    subscriber(filter).init();
}

/// The stderr subscriber, gated only by `filter`.
fn subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

/// Loads configuration, opens the persisted cart and runs one command.
pub async fn run(cli: Cli) -> AppResult<String> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    debug!(data_dir = %config.data_dir.display(), "configuration loaded");

    let storage = Arc::new(JsonFileStorage::new(config.data_dir.clone()));
    let mut ctx = Context::new(&config, storage, cli.json);
    commands::execute(&mut ctx, cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_filter_hides_debug_events() {
        let subscriber = subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "storefront_cli", Level::INFO));
            assert!(!tracing::enabled!(target: "storefront_cli", Level::DEBUG));
            assert!(!tracing::enabled!(target: "storefront_store::store", Level::DEBUG));
            assert!(!tracing::enabled!(target: "storefront_store::storage::json_file", Level::TRACE));
            assert!(tracing::enabled!(target: "other_crate", Level::WARN));
            assert!(!tracing::enabled!(target: "other_crate", Level::INFO));
        });
    }

    #[test]
    fn test_explicit_directives_are_honored() {
        let subscriber = subscriber(EnvFilter::new("error"));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "storefront_cli", Level::ERROR));
            assert!(!tracing::enabled!(target: "storefront_cli", Level::WARN));
            assert!(!tracing::enabled!(target: "storefront_store::store", Level::DEBUG));
        });
    }
}
