//! Checkout command: place the order, then empty the cart.

use tracing::info;

use super::{CheckoutArgs, Context};
use crate::checkout::{CheckoutDetails, OrderConfirmation};
use crate::error::AppResult;

impl From<CheckoutArgs> for CheckoutDetails {
    fn from(args: CheckoutArgs) -> Self {
        CheckoutDetails {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            address: args.address,
            city: args.city,
            state: args.state,
            zip_code: args.zip_code,
            card_number: args.card_number,
            expiry_date: args.expiry_date,
            cvv: args.cvv,
        }
    }
}

/// Places an order for the whole cart. The cart is cleared only on success.
pub async fn place(ctx: &mut Context, args: CheckoutArgs) -> AppResult<String> {
    let details = CheckoutDetails::from(args);

    info!(item_count = ctx.store.cart().item_count(), "processing order");
    let confirmation = ctx.checkout.place_order(ctx.store.cart(), &details).await?;
    ctx.store.clear_cart();

    if ctx.json {
        return Ok(serde_json::to_string_pretty(&confirmation)?);
    }
    Ok(render_text(&confirmation))
}

fn render_text(confirmation: &OrderConfirmation) -> String {
    let summary = &confirmation.summary;
    [
        "Order placed successfully!".to_string(),
        format!("  Order ID:  {}", confirmation.order_id),
        format!("  Name:      {}", confirmation.customer_name),
        format!("  Ship to:   {}", confirmation.shipping_address),
        format!("  Card:      **** {}", confirmation.card_last4),
        format!("  Items:     {}", summary.item_count),
        format!("  Total:     {}", summary.total),
    ]
    .join("\n")
}
