//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add    ┌──────────┐  checkout  ┌──────────┐
//! │  Empty   │────────►│ In Cart  │───────────►│ Ordered  │──► (cleared)
//! └──────────┘         └──────────┘            └──────────┘
//!      ▲                 │  update / remove
//!      └──── clear ──────┘
//! ```
//!
//! Every command that changes the cart prints the cart afterwards.

use storefront_core::validation::{validate_add_request, validate_product_id, validate_quantity};
use storefront_core::{Cart, PricingPolicy};
use tracing::debug;

use super::{CartView, Context};
use crate::error::AppResult;

/// Shows the cart and its order summary.
pub fn show(ctx: &Context) -> AppResult<String> {
    render(ctx)
}

/// Adds `quantity` of a catalog product.
///
/// ## Checks
/// - Product exists in the catalog
/// - Product is in stock
/// - Requested and resulting quantities are within 1..=999
pub fn add(ctx: &mut Context, product_id: &str, quantity: i64) -> AppResult<String> {
    debug!(product_id, quantity, "add command");

    let product = ctx.catalog.get(product_id)?;
    validate_add_request(product, quantity)?;
    validate_quantity(ctx.store.get_item_quantity(product_id) + quantity)?;

    ctx.store.add_to_cart(product, quantity);
    render(ctx)
}

/// Removes a product from the cart. Products not in the cart are ignored.
pub fn remove(ctx: &mut Context, product_id: &str) -> AppResult<String> {
    debug!(product_id, "remove command");
    validate_product_id(product_id)?;

    ctx.store.remove_from_cart(product_id);
    render(ctx)
}

/// Sets the absolute quantity of a product in the cart.
pub fn update(ctx: &mut Context, product_id: &str, quantity: i64) -> AppResult<String> {
    debug!(product_id, quantity, "update command");
    validate_product_id(product_id)?;
    if quantity > 0 {
        validate_quantity(quantity)?;
    }

    ctx.store.update_quantity(product_id, quantity);
    render(ctx)
}

/// Empties the cart.
pub fn clear(ctx: &mut Context) -> AppResult<String> {
    debug!("clear command");
    ctx.store.clear_cart();
    render(ctx)
}

fn render(ctx: &Context) -> AppResult<String> {
    let cart = ctx.store.cart();
    if ctx.json {
        return Ok(serde_json::to_string_pretty(&CartView::new(cart, &ctx.pricing))?);
    }
    Ok(render_text(cart, &ctx.pricing))
}

/// Plain-text cart table.
///
/// ```text
/// Cart (3 items)
///   1   Wireless Headphones       x2     $399.98
///   3   Running Shoes             x1     $129.99
///   ---------------------------------------------
///   Subtotal                             $529.97
///   Shipping                                Free
///   Tax (8%)                              $42.40
///   Total                                $572.37
/// ```
pub fn render_text(cart: &Cart, pricing: &PricingPolicy) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }

    let summary = pricing.summarize(cart);
    let noun = if summary.item_count == 1 { "item" } else { "items" };

    let mut lines = vec![format!("Cart ({} {})", summary.item_count, noun)];
    lines.extend(cart.items().iter().map(|line| {
        format!(
            "  {:<3} {:<24} x{:<4} {:>12}",
            line.product.id,
            line.product.name,
            line.quantity,
            line.line_total().to_string()
        )
    }));

    let shipping = if summary.ships_free() {
        "Free".to_string()
    } else {
        summary.shipping.to_string()
    };
    let tax_label = format!("Tax ({}%)", pricing.tax_rate.percentage());

    lines.push(format!("  {}", "-".repeat(45)));
    for (label, amount) in [
        ("Subtotal", summary.subtotal.to_string()),
        ("Shipping", shipping),
        (tax_label.as_str(), summary.tax.to_string()),
        ("Total", summary.total.to_string()),
    ] {
        lines.push(format!("  {:<32} {:>12}", label, amount));
    }
    lines.join("\n")
}
