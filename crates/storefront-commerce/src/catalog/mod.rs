//! Product catalog module.
//!
//! Contains types for products, categories, and catalog providers.

mod category;
mod product;
mod provider;

pub use category::{slugify, Category};
pub use product::Product;
pub use provider::{CatalogFile, CatalogProvider, CategoryRecord, InMemoryCatalog, ProductRecord};
