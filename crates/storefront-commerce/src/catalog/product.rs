//! Product types.

use crate::catalog::category::slugify;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are owned by the catalog provider. The cart stores clones and
/// never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current unit price.
    pub price: Money,
    /// Price before the sale, shown struck through.
    pub original_price: Option<Money>,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs.
    pub images: Vec<String>,
    /// Category display name (e.g., "Home & Garden").
    pub category: String,
    /// Brand name.
    pub brand: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Long description.
    pub description: String,
    /// Feature bullet points.
    pub features: Vec<String>,
    /// Whether the product can currently be bought.
    pub in_stock: bool,
    /// Units on hand.
    pub stock_count: u32,
    /// Tags for search.
    pub tags: Vec<String>,
    /// Whether the product is on sale.
    pub is_on_sale: bool,
    /// Whether the product is featured on the landing page.
    pub is_featured: bool,
}

impl Product {
    /// Create a new in-stock product with only the required fields set.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            image: String::new(),
            images: Vec::new(),
            category: String::new(),
            brand: String::new(),
            rating: 0.0,
            review_count: 0,
            description: String::new(),
            features: Vec::new(),
            in_stock: true,
            stock_count: 0,
            tags: Vec::new(),
            is_on_sale: false,
            is_featured: false,
        }
    }

    /// Set the category display name.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the primary image, also adding it to the gallery.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !self.images.contains(&url) {
            self.images.insert(0, url.clone());
        }
        self.image = url;
        self
    }

    /// Set rating and review count.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self.review_count = review_count;
        self
    }

    /// Set the stock count. A zero count marks the product out of stock.
    pub fn with_stock(mut self, stock_count: u32) -> Self {
        self.stock_count = stock_count;
        self.in_stock = stock_count > 0;
        self
    }

    /// Put the product on sale with the given pre-sale price.
    pub fn with_sale(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self.is_on_sale = true;
        self
    }

    /// Mark as featured.
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Add a feature bullet.
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Slug of the category name, used to match category filters.
    pub fn category_slug(&self) -> String {
        slugify(&self.category)
    }

    /// Whole-percent discount against the original price, if any.
    pub fn discount_percentage(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.amount_cents <= 0 || original.amount_cents <= self.price.amount_cents {
            return None;
        }
        let savings = (original.amount_cents - self.price.amount_cents) as f64;
        Some((savings / original.amount_cents as f64 * 100.0).round() as u32)
    }

    /// Amount saved against the original price, if any.
    pub fn savings(&self) -> Option<Money> {
        let original = self.original_price?;
        (original.amount_cents > self.price.amount_cents).then(|| {
            Money::new(original.amount_cents - self.price.amount_cents, self.price.currency)
        })
    }

    /// Whether `quantity` units can be supplied from current stock.
    pub fn can_fulfil(&self, quantity: u64) -> bool {
        self.in_stock && quantity <= u64::from(self.stock_count)
    }

    /// Rating rounded down to whole stars, as shown on product cards.
    pub fn full_stars(&self) -> u8 {
        self.rating.floor().clamp(0.0, 5.0) as u8
    }
}
