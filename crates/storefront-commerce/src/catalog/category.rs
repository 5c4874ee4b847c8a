//! Category types for product organization.

use crate::catalog::Product;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name (e.g., "Home & Garden").
    pub name: String,
    /// URL-friendly slug (e.g., "home-garden").
    pub slug: String,
    /// Category image URL.
    #[serde(default)]
    pub image: String,
    /// Advertised number of products in this category.
    #[serde(default)]
    pub product_count: u32,
}

impl Category {
    /// Create a category whose slug is derived from its name.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            image: String::new(),
            product_count: 0,
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = url.into();
        self
    }

    /// Set the advertised product count.
    pub fn with_product_count(mut self, count: u32) -> Self {
        self.product_count = count;
        self
    }

    /// Check whether a product belongs to this category.
    pub fn contains(&self, product: &Product) -> bool {
        product.category_slug() == self.slug
    }
}

/// Turn a display name into a slug.
///
/// Lowercases ASCII, drops `&` and collapses every run of other
/// non-alphanumeric characters into a single `-`.
///
/// ```
/// use storefront_commerce::catalog::slugify;
/// assert_eq!(slugify("Home & Garden"), "home-garden");
/// assert_eq!(slugify("  Sports  "), "sports");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars().filter(|c| *c != '&') {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
