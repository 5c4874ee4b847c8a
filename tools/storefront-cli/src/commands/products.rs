//! Product listing.

use anyhow::Result;
use storefront_commerce::catalog::CatalogProvider;
use storefront_commerce::money::Money;
use storefront_commerce::search::{PriceRange, ProductFilter, SearchQuery};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{rating_stars, stock_badge};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args, ctx);
    let products = query.run(ctx.catalog.products());

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} · {} ({})",
        ctx.config.store.name,
        query.sort.display_name(),
        products.len()
    ));

    if products.is_empty() {
        ctx.output.info("No products found. Try adjusting your search or filters.");
        return Ok(());
    }

    let widths = [6, 30, 14, 12, 14, 12];
    ctx.output.table_row(
        &["ID", "NAME", "PRICE", "RATING", "BRAND", "STOCK"],
        &widths,
    );
    ctx.output.rule();
    for product in &products {
        let price = match product.discount_percentage() {
            Some(pct) => format!("{} -{}%", product.price, pct),
            None => product.price.to_string(),
        };
        // styled, so last
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &price,
                &rating_stars(product.rating),
                &product.brand,
                &stock_badge(product),
            ],
            &widths,
        );
    }

    Ok(())
}

fn build_query(args: &ProductsArgs, ctx: &Context) -> SearchQuery {
    let currency = ctx.catalog.currency();
    let default_range = PriceRange::default_for(currency);
    let range = PriceRange::new(
        args.min
            .map(|min| Money::from_decimal(min, currency))
            .unwrap_or(default_range.min),
        args.max
            .map(|max| Money::from_decimal(max, currency))
            .unwrap_or(default_range.max),
    );

    let mut filter = ProductFilter::new()
        .with_price_range(range)
        .in_stock_only(args.in_stock)
        .on_sale_only(args.on_sale);
    if let Some(search) = &args.search {
        filter = filter.with_query(search.as_str());
    }
    for category in &args.categories {
        filter = filter.toggle_category(category.as_str());
    }
    for brand in &args.brands {
        filter = filter.toggle_brand(brand.as_str());
    }

    ctx.output.debug(&format!(
        "filters active: {}",
        filter.has_active_filters()
    ));

    SearchQuery::new().with_filter(filter).with_sort(args.sort)
}
