//! CLI command implementations.

pub mod categories;
pub mod checkout;
pub mod config;
pub mod products;
pub mod quote;
pub mod show;

use std::str::FromStr;

use anyhow::{bail, Context as _};
use clap::{Args, Subcommand};
use storefront_commerce::ids::ProductId;
use storefront_commerce::search::SortOption;

/// A product reference on the command line: `<id>` or `<id>:<quantity>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl FromStr for ItemSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (id, quantity) = match s.rsplit_once(':') {
            Some((id, qty)) => {
                let qty = qty
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("invalid quantity in '{}'", s))?;
                (id, qty)
            }
            None => (s, 1),
        };

        let id = id.trim();
        if id.is_empty() {
            bail!("missing product id in '{}'", s);
        }

        Ok(Self {
            product_id: ProductId::new(id),
            quantity,
        })
    }
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Free-text search over name, description, category and brand.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category slug to include (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Brand to include (repeatable).
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Minimum price.
    #[arg(long)]
    pub min: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub max: Option<f64>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Only products on sale.
    #[arg(long)]
    pub on_sale: bool,

    /// Sort order: featured, price-low, price-high, rating, newest.
    #[arg(long, default_value = "featured")]
    pub sort: SortOption,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Include product names under each category.
    #[arg(short, long)]
    pub products: bool,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Item to add, as `<id>` or `<id>:<quantity>` (repeatable).
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemSpec>,

    /// Set a line's quantity after adding, as `<id>:<quantity>` (repeatable).
    #[arg(long = "set")]
    pub updates: Vec<ItemSpec>,

    /// Remove a product after adding (repeatable).
    #[arg(long = "remove")]
    pub removals: Vec<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Item to buy, as `<id>` or `<id>:<quantity>` (repeatable).
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemSpec>,

    /// Name on the card.
    #[arg(long)]
    pub name: String,

    /// Email for the receipt.
    #[arg(long)]
    pub email: String,

    /// Street address.
    #[arg(long)]
    pub line1: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    #[arg(long)]
    pub postal_code: String,

    /// Two-letter country code.
    #[arg(long, default_value = storefront_commerce::checkout::DEFAULT_COUNTRY)]
    pub country: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default storefront.toml in the current directory.
    Init {
        /// Store name.
        #[arg(long, default_value = "Storefront")]
        name: String,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
