//! Pay for a cart with the simulated gateway.

use anyhow::{Context as _, Result};
use serde::Serialize;
use storefront_commerce::checkout::{BillingAddress, BillingDetails, Order};

use super::quote::{fill_store, print_cart};
use super::CheckoutArgs;
use crate::context::Context;
use crate::output::status_badge;

#[derive(Serialize)]
struct CheckoutReport<'a> {
    order: &'a Order,
    cart_items_after: u64,
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let (mut store, _) = fill_store(&ctx.catalog, &args.items)?;
    let billing = BillingDetails::new(
        args.name,
        args.email,
        BillingAddress {
            line1: args.line1,
            city: args.city,
            state: args.state,
            postal_code: args.postal_code,
            country: args.country,
        },
    );
    billing.validate()?;

    if !ctx.output.is_json() {
        print_cart(&ctx.output, store.cart());
    }

    let gateway = ctx.config.gateway();
    ctx.output.debug(&format!(
        "processing delay: {}ms",
        gateway.processing_delay().as_millis()
    ));

    let amount = store.cart().total();
    let spinner = ctx.output.spinner(&format!("Processing payment of {}...", amount));
    let result = store.checkout(billing, &gateway).await;
    spinner.finish_and_clear();

    let order = match result {
        Ok(order) => order,
        Err(err) => {
            if err.is_retryable() {
                ctx.output.warn("Your cart was not charged. You can try again.");
            }
            return Err(err).context("Payment failed");
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&CheckoutReport {
            order: &order,
            cart_items_after: store.item_count(),
        });
        return Ok(());
    }

    ctx.output.success(&format!("Payment successful! Order {} placed.", order.id));
    ctx.output.kv("order", order.id.as_str());
    ctx.output.kv("payment", order.payment_intent_id.as_str());
    ctx.output.kv("status", &status_badge(order.status.as_str()));
    ctx.output.kv("amount", &order.amount.display());
    ctx.output.kv("items", &order.item_count().to_string());
    ctx.output.kv(
        "estimated delivery",
        &order.estimated_delivery.format("%a %b %e %Y").to_string(),
    );
    ctx.output.kv("receipt sent to", &order.billing_details.email);

    Ok(())
}
