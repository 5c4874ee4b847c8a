//! Product detail.

use anyhow::Result;
use storefront_commerce::catalog::CatalogProvider;
use storefront_commerce::ids::ProductId;

use super::ShowArgs;
use crate::context::Context;
use crate::output::{rating_stars, stock_badge};

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog.require_product(&ProductId::new(args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("brand", &product.brand);
    ctx.output.kv("category", &product.category);
    ctx.output.kv("price", &product.price.display());
    if let (Some(original), Some(savings), Some(pct)) = (
        product.original_price,
        product.savings(),
        product.discount_percentage(),
    ) {
        ctx.output.kv(
            "was",
            &format!("{} (save {}, {}% off)", original, savings, pct),
        );
    }
    ctx.output.kv(
        "rating",
        &format!("{} ({} reviews)", rating_stars(product.rating), product.review_count),
    );
    ctx.output.kv("stock", &stock_badge(product));

    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    if !product.features.is_empty() {
        ctx.output.header("Features");
        for feature in &product.features {
            ctx.output.list_item(feature);
        }
    }

    if !product.tags.is_empty() {
        ctx.output.kv("tags", &product.tags.join(", "));
    }

    Ok(())
}
