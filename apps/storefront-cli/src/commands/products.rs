//! Catalog listing.

use serde::Serialize;
use storefront_core::{Money, Product};

use super::Context;
use crate::error::AppResult;

/// A catalog entry annotated with how many are already in the cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub in_cart: i64,
}

/// Lists the catalog, optionally narrowed to one category.
pub fn list(ctx: &Context, category: Option<&str>) -> AppResult<String> {
    let views: Vec<ProductView<'_>> = ctx
        .catalog
        .products()
        .iter()
        .filter(|p| category.map_or(true, |c| p.category.eq_ignore_ascii_case(c)))
        .map(|product| ProductView {
            product,
            in_cart: ctx.store.get_item_quantity(&product.id),
        })
        .collect();

    if ctx.json {
        return Ok(serde_json::to_string_pretty(&views)?);
    }
    Ok(render_text(&views))
}

fn render_text(views: &[ProductView<'_>]) -> String {
    if views.is_empty() {
        return "No products found".to_string();
    }

    views
        .iter()
        .map(|view| {
            let p = view.product;
            let mut notes = Vec::new();
            if !p.in_stock {
                notes.push("out of stock".to_string());
            }
            if view.in_cart > 0 {
                notes.push(format!("{} in cart", view.in_cart));
            }

            let row = format!(
                "{:<3} {:<24} {:>10}  {:<15}",
                p.id,
                p.name,
                Money::from_cents(p.price_cents).to_string(),
                p.category
            );
            if notes.is_empty() {
                row
            } else {
                format!("{} ({})", row, notes.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
