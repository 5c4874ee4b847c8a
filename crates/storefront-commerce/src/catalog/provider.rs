//! Catalog providers: read-only sources of products and categories.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{slugify, Category, Product};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::{Currency, Money};

/// A read-only source of catalog data.
pub trait CatalogProvider {
    /// All products, in catalog order.
    fn products(&self) -> &[Product];

    /// All categories, in catalog order.
    fn categories(&self) -> &[Category];

    /// Look up a product by ID.
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }

    /// Look up a product by ID, failing if it is unknown.
    fn require_product(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.product(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Look up a category by slug.
    fn category(&self, slug: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.slug == slug)
    }

    /// Products flagged as featured.
    fn featured_products(&self) -> Vec<&Product> {
        self.products().iter().filter(|p| p.is_featured).collect()
    }

    /// Products currently on sale.
    fn sale_products(&self) -> Vec<&Product> {
        self.products().iter().filter(|p| p.is_on_sale).collect()
    }

    /// Distinct brand names, sorted.
    fn available_brands(&self) -> Vec<String> {
        self.products()
            .iter()
            .filter(|p| !p.brand.is_empty())
            .map(|p| p.brand.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryCatalog {
    currency: Currency,
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl InMemoryCatalog {
    /// Create a catalog from products and categories.
    pub fn new(currency: Currency, products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            currency,
            products,
            categories,
        }
    }

    /// Load a catalog from a TOML or JSON file (chosen by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        CatalogFile::load(path).map(CatalogFile::into_catalog)
    }

    /// Currency every product in this catalog is priced in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The built-in demo catalog.
    pub fn demo() -> Self {
        let usd = |amount: f64| Money::from_decimal(amount, Currency::USD);
        let img = |slug: &str| {
            format!("https://images.unsplash.com/{}?w=400&h=400&fit=crop", slug)
        };

        let categories = vec![
            Category::new("1", "Electronics")
                .with_image(img("photo-1468495244123-6c6c332eeece"))
                .with_product_count(156),
            Category::new("2", "Fashion")
                .with_image(img("photo-1441986300917-64674bd600d8"))
                .with_product_count(298),
            Category::new("3", "Home & Garden")
                .with_image(img("photo-1586023492125-27b2c045efd7"))
                .with_product_count(89),
            Category::new("4", "Sports")
                .with_image(img("photo-1571019613454-1cb2f99b2d8b"))
                .with_product_count(134),
        ];

        let products = vec![
            Product::new("1", "Wireless Noise-Cancelling Headphones", usd(299.99))
                .with_sale(usd(399.99))
                .with_image(img("photo-1505740420928-5e560c06d30e"))
                .with_category("Electronics")
                .with_brand("AudioTech")
                .with_rating(4.8, 284)
                .with_description(
                    "Premium wireless headphones with active noise cancellation and 30-hour battery life.",
                )
                .with_feature("Active Noise Cancellation")
                .with_feature("30-hour battery")
                .with_feature("Bluetooth 5.0")
                .with_feature("Quick charge")
                .with_stock(24)
                .with_tag("wireless")
                .with_tag("noise-cancelling")
                .with_tag("premium")
                .featured(),
            Product::new("2", "Smart Fitness Watch", usd(199.99))
                .with_image(img("photo-1523275335684-37898b6baf30"))
                .with_category("Electronics")
                .with_brand("FitTech")
                .with_rating(4.6, 189)
                .with_description("Advanced fitness tracking with heart rate monitoring and GPS.")
                .with_feature("Heart Rate Monitor")
                .with_feature("GPS Tracking")
                .with_feature("Water Resistant")
                .with_feature("7-day battery")
                .with_stock(18)
                .with_tag("fitness")
                .with_tag("smartwatch")
                .with_tag("health")
                .featured(),
            Product::new("3", "Minimalist Desk Chair", usd(449.99))
                .with_sale(usd(599.99))
                .with_image(img("photo-1586023492125-27b2c045efd7"))
                .with_category("Home & Garden")
                .with_brand("ModernSpace")
                .with_rating(4.7, 92)
                .with_description("Ergonomic office chair with premium materials and modern design.")
                .with_feature("Ergonomic Design")
                .with_feature("Premium Materials")
                .with_feature("Adjustable Height")
                .with_feature("5-year warranty")
                .with_stock(8)
                .with_tag("furniture")
                .with_tag("office")
                .with_tag("ergonomic"),
            Product::new("4", "Premium Running Shoes", usd(129.99))
                .with_image(img("photo-1542291026-7eec264c27ff"))
                .with_category("Sports")
                .with_brand("RunFast")
                .with_rating(4.5, 156)
                .with_description("Lightweight running shoes with advanced cushioning technology.")
                .with_feature("Lightweight Design")
                .with_feature("Advanced Cushioning")
                .with_feature("Breathable Mesh")
                .with_feature("Durable Sole")
                .with_stock(34)
                .with_tag("running")
                .with_tag("sports")
                .with_tag("lightweight")
                .featured(),
            Product::new("5", "Vintage Denim Jacket", usd(89.99))
                .with_sale(usd(119.99))
                .with_image(img("photo-1544966503-7cc5ac882d5c"))
                .with_category("Fashion")
                .with_brand("VintageStyle")
                .with_rating(4.3, 78)
                .with_description("Classic denim jacket with vintage wash and modern fit.")
                .with_feature("Vintage Wash")
                .with_feature("Modern Fit")
                .with_feature("Premium Denim")
                .with_feature("Classic Style")
                .with_stock(12)
                .with_tag("denim")
                .with_tag("vintage")
                .with_tag("casual"),
            Product::new("6", "Wireless Charging Pad", usd(39.99))
                .with_image(img("photo-1572569511254-d8f925fe2cbb"))
                .with_category("Electronics")
                .with_brand("ChargeFast")
                .with_rating(4.4, 203)
                .with_description("Fast wireless charging pad compatible with all Qi-enabled devices.")
                .with_feature("Fast Charging")
                .with_feature("Qi Compatible")
                .with_feature("LED Indicator")
                .with_feature("Non-slip Base")
                .with_stock(45)
                .with_tag("wireless")
                .with_tag("charging")
                .with_tag("convenient"),
        ];

        Self::new(Currency::USD, products, categories)
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// On-disk catalog document.
///
/// Prices are written as decimal numbers in the catalog currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Currency all prices are given in.
    #[serde(default)]
    pub currency: Currency,

    /// Category records.
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,

    /// Product records.
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// A category as written in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    /// Derived from `name` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub product_count: u32,
}

/// A product as written in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Defaults to `stock_count > 0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub stock_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Defaults to whether an original price is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_on_sale: Option<bool>,
    #[serde(default)]
    pub is_featured: bool,
}

impl CatalogFile {
    /// Load from a file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|source| CommerceError::CatalogIo {
            path: display.clone(),
            source,
        })?;

        let file = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| CommerceError::CatalogParse {
                path: display.clone(),
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| CommerceError::CatalogParse {
                path: display.clone(),
                message: e.to_string(),
            })?
        };

        tracing::debug!(path = %path.display(), "loaded catalog file");
        Ok(file)
    }

    /// Convert the records into an in-memory catalog.
    pub fn into_catalog(self) -> InMemoryCatalog {
        let currency = self.currency;

        let categories = self
            .categories
            .into_iter()
            .map(|record| Category {
                id: CategoryId::new(record.id),
                slug: record.slug.unwrap_or_else(|| slugify(&record.name)),
                name: record.name,
                image: record.image,
                product_count: record.product_count,
            })
            .collect();

        let products = self
            .products
            .into_iter()
            .map(|record| {
                let original_price = record
                    .original_price
                    .map(|amount| Money::from_decimal(amount, currency));
                let mut images = record.images;
                if !record.image.is_empty() && !images.contains(&record.image) {
                    images.insert(0, record.image.clone());
                }
                Product {
                    id: ProductId::new(record.id),
                    name: record.name,
                    price: Money::from_decimal(record.price.max(0.0), currency),
                    original_price,
                    image: record.image,
                    images,
                    category: record.category,
                    brand: record.brand,
                    rating: record.rating.clamp(0.0, 5.0),
                    review_count: record.review_count,
                    description: record.description,
                    features: record.features,
                    in_stock: record.in_stock.unwrap_or(record.stock_count > 0),
                    stock_count: record.stock_count,
                    tags: record.tags,
                    is_on_sale: record.is_on_sale.unwrap_or(original_price.is_some()),
                    is_featured: record.is_featured,
                }
            })
            .collect();

        InMemoryCatalog::new(currency, products, categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_CATALOG: &str = r#"
currency = "USD"

[[categories]]
id = "1"
name = "Home & Garden"

[[products]]
id = "lamp"
name = "Desk Lamp"
price = 24.5
original_price = 30.0
category = "Home & Garden"
brand = "Lumen"
stock_count = 3

[[products]]
id = "rug"
name = "Wool Rug"
price = 80
category = "Home & Garden"
brand = "Weave"
"#;

    #[test]
    fn test_demo_catalog() {
        let catalog = InMemoryCatalog::demo();
        assert_eq!(catalog.products().len(), 6);
        assert_eq!(catalog.categories().len(), 4);
        assert_eq!(catalog.featured_products().len(), 3);
        assert_eq!(catalog.sale_products().len(), 3);
    }

    #[test]
    fn test_demo_categories_match_products() {
        let catalog = InMemoryCatalog::demo();
        let home = catalog.category("home-garden").unwrap();
        let count = catalog.products().iter().filter(|p| home.contains(p)).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_available_brands_sorted_unique() {
        let catalog = InMemoryCatalog::demo();
        let brands = catalog.available_brands();
        assert_eq!(
            brands,
            vec!["AudioTech", "ChargeFast", "FitTech", "ModernSpace", "RunFast", "VintageStyle"]
        );
    }

    #[test]
    fn test_require_product() {
        let catalog = InMemoryCatalog::demo();
        assert!(catalog.require_product(&ProductId::new("1")).is_ok());
        assert!(matches!(
            catalog.require_product(&ProductId::new("404")),
            Err(CommerceError::ProductNotFound(id)) if id == "404"
        ));
    }

    #[test]
    fn test_load_toml_catalog() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_CATALOG.as_bytes()).unwrap();

        let catalog = InMemoryCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.currency(), Currency::USD);
        assert_eq!(catalog.categories()[0].slug, "home-garden");

        let lamp = catalog.product(&ProductId::new("lamp")).unwrap();
        assert_eq!(lamp.price.amount_cents, 2450);
        assert!(lamp.is_on_sale);
        assert!(lamp.in_stock);

        let rug = catalog.product(&ProductId::new("rug")).unwrap();
        assert_eq!(rug.price.amount_cents, 8000);
        assert!(!rug.is_on_sale);
        assert!(!rug.in_stock);
    }

    #[test]
    fn test_load_json_catalog() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(
            br#"{"products":[{"id":"a","name":"A","price":1.25,"stock_count":1}]}"#,
        )
        .unwrap();

        let catalog = InMemoryCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.products()[0].price.amount_cents, 125);
    }

    #[test]
    fn test_catalog_file_load_keeps_records() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_CATALOG.as_bytes()).unwrap();

        let loaded = CatalogFile::load(file.path()).unwrap();
        assert_eq!(loaded.categories.len(), 1);
        assert_eq!(loaded.products.len(), 2);
        assert!(loaded.products.iter().any(|p| p.id == "lamp"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = InMemoryCatalog::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("here.toml"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = InMemoryCatalog::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, CommerceError::CatalogIo { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[[products]]\nid = 5\n").unwrap();

        let err = InMemoryCatalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CommerceError::CatalogParse { .. }));
    }
}
