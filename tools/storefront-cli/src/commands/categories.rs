//! Category listing.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::catalog::{CatalogProvider, Category};

use super::CategoriesArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CategorySummary<'a> {
    #[serde(flatten)]
    category: &'a Category,
    /// Products in the loaded catalog, as opposed to the advertised count.
    listed: usize,
}

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let products = ctx.catalog.products();
    let summaries: Vec<CategorySummary<'_>> = ctx
        .catalog
        .categories()
        .iter()
        .map(|category| CategorySummary {
            category,
            listed: products.iter().filter(|p| category.contains(p)).count(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&summaries);
        return Ok(());
    }

    ctx.output.header("Categories");
    if summaries.is_empty() {
        ctx.output.info("No categories configured.");
        return Ok(());
    }

    for summary in &summaries {
        ctx.output.list_item(&format!(
            "{} ({}) · {} products, {} listed",
            summary.category.name,
            summary.category.slug,
            summary.category.product_count,
            summary.listed
        ));
        if args.products {
            for product in products.iter().filter(|p| summary.category.contains(p)) {
                ctx.output.kv(product.id.as_str(), &product.name);
            }
        }
    }

    let brands = ctx.catalog.available_brands();
    if !brands.is_empty() {
        ctx.output.header("Brands");
        ctx.output.info(&brands.join(", "));
    }

    Ok(())
}
