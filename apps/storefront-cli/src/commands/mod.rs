//! # Commands
//!
//! Command-line surface of the storefront. Each invocation runs exactly one
//! command against one [`Context`].
//!
//! ## Command Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront products [--category C]     list the catalog               │
//! │  storefront cart                        show cart + order summary      │
//! │  storefront add <ID> [-q N]             add N (default 1)              │
//! │  storefront update <ID> <N>             set quantity (N <= 0 removes)  │
//! │  storefront remove <ID>                 drop a line                    │
//! │  storefront clear                       empty the cart                 │
//! │  storefront checkout --first-name ...   place a (simulated) order     │
//! │                                                                         │
//! │  Global: --data-dir DIR   --json                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod products;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use storefront_core::{Cart, CartLine, OrderSummary, PricingPolicy};
use storefront_store::{CartStore, KeyValueStorage};

use crate::catalog::Catalog;
use crate::checkout::CheckoutService;
use crate::config::StorefrontConfig;
use crate::error::AppResult;

/// Demo storefront: browse products, manage a persistent cart, check out.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
pub struct Cli {
    /// Directory holding the persisted cart (overrides STOREFRONT_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products in the catalog.
    Products {
        /// Only show this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the cart and its order summary.
    Cart,
    /// Add a product to the cart.
    Add {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Remove a product from the cart.
    Remove { product_id: String },
    /// Set the quantity of a product already in the cart.
    Update {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
    /// Place an order for everything in the cart.
    Checkout(CheckoutArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zip_code: String,
    #[arg(long)]
    pub card_number: String,
    #[arg(long)]
    pub expiry_date: String,
    #[arg(long)]
    pub cvv: String,
}

/// Everything a command may touch.
pub struct Context {
    pub catalog: Catalog,
    pub store: CartStore,
    pub pricing: PricingPolicy,
    pub checkout: CheckoutService,
    pub json: bool,
}

impl Context {
    /// Opens the cart store over `storage` and wires up the services.
    pub fn new(config: &StorefrontConfig, storage: Arc<dyn KeyValueStorage>, json: bool) -> Self {
        Context {
            catalog: Catalog::demo(),
            store: CartStore::open(storage),
            pricing: config.pricing,
            checkout: CheckoutService::new(config.pricing, config.checkout_delay),
            json,
        }
    }
}

/// Runs one command and returns what should be printed.
pub async fn execute(ctx: &mut Context, command: Command) -> AppResult<String> {
    match command {
        Command::Products { category } => products::list(ctx, category.as_deref()),
        Command::Cart => cart::show(ctx),
        Command::Add {
            product_id,
            quantity,
        } => cart::add(ctx, &product_id, quantity),
        Command::Remove { product_id } => cart::remove(ctx, &product_id),
        Command::Update {
            product_id,
            quantity,
        } => cart::update(ctx, &product_id, quantity),
        Command::Clear => cart::clear(ctx),
        Command::Checkout(args) => checkout::place(ctx, args).await,
    }
}

/// Cart contents plus pricing, as printed by cart commands.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView<'a> {
    pub items: &'a [CartLine],
    pub summary: OrderSummary,
}

impl<'a> CartView<'a> {
    pub fn new(cart: &'a Cart, pricing: &PricingPolicy) -> Self {
        CartView {
            items: cart.items(),
            summary: pricing.summarize(cart),
        }
    }
}
