//! Price a cart without paying for it.

use anyhow::Result;
use storefront_commerce::cart::{Cart, CartAction, CartNotice, CartStore};
use storefront_commerce::catalog::{CatalogProvider, InMemoryCatalog};
use storefront_commerce::ids::ProductId;

use super::{ItemSpec, QuoteArgs};
use crate::context::Context;
use crate::output::Output;

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let (mut store, mut notices) = fill_store(&ctx.catalog, &args.items)?;

    for update in args.updates {
        ctx.catalog.require_product(&update.product_id)?;
        notices.extend(store.dispatch(CartAction::UpdateQuantity {
            product_id: update.product_id,
            quantity: update.quantity,
        }));
    }
    for id in args.removals {
        notices.extend(store.dispatch(CartAction::RemoveItem {
            product_id: ProductId::new(id),
        }));
    }

    if ctx.output.is_json() {
        ctx.output.json(store.cart());
        return Ok(());
    }

    for notice in &notices {
        ctx.output.debug(&format!("{}: {}", notice.title, notice.description));
    }
    print_cart(&ctx.output, store.cart());
    Ok(())
}

/// Add every item to a fresh store in the catalog's currency.
///
/// Unknown product ids are an error; quantities are passed through to the
/// ledger as given.
pub fn fill_store(
    catalog: &InMemoryCatalog,
    items: &[ItemSpec],
) -> Result<(CartStore, Vec<CartNotice>)> {
    let mut store = CartStore::with_currency(catalog.currency());
    let mut notices = Vec::new();
    for item in items {
        let product = catalog.require_product(&item.product_id)?;
        notices.extend(store.dispatch(CartAction::AddItem {
            product: product.clone(),
            quantity: item.quantity,
        }));
    }
    Ok((store, notices))
}

/// Print cart lines and totals.
pub fn print_cart(output: &Output, cart: &Cart) {
    output.header(&format!("Cart ({} items)", cart.item_count()));
    if cart.is_empty() {
        output.info("Your cart is empty.");
        return;
    }

    let widths = [30, 10, 6, 12];
    output.table_row(&["PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
    output.rule();
    for line in cart.items() {
        output.table_row(
            &[
                &line.product.name,
                &line.product.price.to_string(),
                &line.quantity.to_string(),
                &line.line_total().to_string(),
            ],
            &widths,
        );
    }
    output.rule();

    let totals = cart.totals();
    output.kv("Subtotal", &totals.subtotal.display());
    output.kv("Tax (8%)", &totals.tax.display());
    if totals.ships_free() {
        output.kv("Shipping", "Free");
    } else {
        output.kv("Shipping", &totals.shipping.display());
        output.info(&format!(
            "Add {} more for free shipping.",
            totals.remaining_for_free_shipping()
        ));
    }
    output.kv("Total", &totals.total.display());

    for line in cart.stock_shortfalls() {
        output.warn(&format!(
            "{}: only {} in stock, {} in cart",
            line.product.name, line.product.stock_count, line.quantity
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(specs: &[&str]) -> Vec<ItemSpec> {
        specs.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_fill_store_merges_repeated_items() {
        let catalog = InMemoryCatalog::demo();
        let (store, notices) = fill_store(&catalog, &items(&["1", "1:2", "6"])).unwrap();

        assert_eq!(store.item_count(), 4);
        assert_eq!(store.cart().unique_item_count(), 2);
        assert_eq!(notices.len(), 3);
        assert_eq!(notices[0].title, "Added to cart");
    }

    #[test]
    fn test_fill_store_unknown_product() {
        let catalog = InMemoryCatalog::demo();
        let err = fill_store(&catalog, &items(&["1", "nope"])).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_fill_store_uses_catalog_currency() {
        let catalog = InMemoryCatalog::demo();
        let (store, _) = fill_store(&catalog, &items(&["2"])).unwrap();
        assert_eq!(store.cart().currency(), catalog.currency());
        assert_eq!(store.cart().subtotal(), catalog.products()[1].price);
    }
}
