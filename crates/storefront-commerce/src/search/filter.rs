//! Product listing filters.

use crate::catalog::{slugify, Product};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Upper bound of the default price range, in whole currency units.
pub const DEFAULT_MAX_PRICE: i64 = 1000;

/// An inclusive price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest price shown.
    pub min: Money,
    /// Highest price shown.
    pub max: Money,
}

impl PriceRange {
    /// Create a range; bounds are swapped if given in the wrong order.
    pub fn new(min: Money, max: Money) -> Self {
        if min.amount_cents > max.amount_cents {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// The default listing range, 0 to 1000 in the given currency.
    pub fn default_for(currency: Currency) -> Self {
        let per_unit = 10_i64.pow(currency.decimal_places());
        Self::new(
            Money::zero(currency),
            Money::new(DEFAULT_MAX_PRICE * per_unit, currency),
        )
    }

    /// Check if a price falls inside the range.
    pub fn contains(&self, price: &Money) -> bool {
        price.amount_cents >= self.min.amount_cents && price.amount_cents <= self.max.amount_cents
    }

    /// Whether this range narrows the default one.
    pub fn is_narrowed(&self) -> bool {
        *self != Self::default_for(self.min.currency)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::default_for(Currency::default())
    }
}

/// Filters applied to a product listing.
///
/// Every criterion must match. Within the category and brand lists any one
/// entry is enough.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive text matched against name, description, category and brand.
    pub query: Option<String>,
    /// Category slugs.
    pub categories: Vec<String>,
    /// Price range.
    pub price_range: PriceRange,
    /// Brand names.
    pub brands: Vec<String>,
    /// Hide out-of-stock products.
    pub in_stock_only: bool,
    /// Show only products on sale.
    pub on_sale_only: bool,
}

impl ProductFilter {
    /// Create an empty filter that matches everything in the default price range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank queries are ignored.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.trim().is_empty()).then_some(query);
        self
    }

    /// Toggle a category slug on or off.
    pub fn toggle_category(mut self, slug: impl Into<String>) -> Self {
        toggle(&mut self.categories, slugify(&slug.into()));
        self
    }

    /// Toggle a brand on or off.
    pub fn toggle_brand(mut self, brand: impl Into<String>) -> Self {
        toggle(&mut self.brands, brand.into());
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Only show in-stock products.
    pub fn in_stock_only(mut self, enabled: bool) -> Self {
        self.in_stock_only = enabled;
        self
    }

    /// Only show products on sale.
    pub fn on_sale_only(mut self, enabled: bool) -> Self {
        self.on_sale_only = enabled;
        self
    }

    /// Whether any filter other than the text query is narrowing the listing.
    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.brands.is_empty()
            || self.price_range.is_narrowed()
            || self.in_stock_only
            || self.on_sale_only
    }

    /// Reset everything except the text query.
    pub fn cleared(&self) -> Self {
        Self {
            query: self.query.clone(),
            price_range: PriceRange::default_for(self.price_range.min.currency),
            ..Self::default()
        }
    }

    /// Check if a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let hit = [
                &product.name,
                &product.description,
                &product.category,
                &product.brand,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if !self.categories.is_empty() {
            let slug = product.category_slug();
            if !self.categories.iter().any(|c| *c == slug) {
                return false;
            }
        }

        if !self.price_range.contains(&product.price) {
            return false;
        }

        if !self.brands.is_empty() && !self.brands.contains(&product.brand) {
            return false;
        }

        if self.in_stock_only && !product.in_stock {
            return false;
        }

        if self.on_sale_only && !product.is_on_sale {
            return false;
        }

        true
    }
}

fn toggle(list: &mut Vec<String>, value: String) {
    if let Some(pos) = list.iter().position(|v| *v == value) {
        list.remove(pos);
    } else {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogProvider, InMemoryCatalog};

    fn usd(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::USD)
    }

    fn ids(catalog: &InMemoryCatalog, filter: &ProductFilter) -> Vec<String> {
        catalog
            .products()
            .iter()
            .filter(|p| filter.matches(p))
            .map(|p| p.id.to_string())
            .collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let catalog = InMemoryCatalog::demo();
        assert_eq!(ids(&catalog, &ProductFilter::new()).len(), 6);
    }

    #[test]
    fn test_query_searches_brand_and_category() {
        let catalog = InMemoryCatalog::demo();
        assert_eq!(ids(&catalog, &ProductFilter::new().with_query("audiotech")), vec!["1"]);
        assert_eq!(ids(&catalog, &ProductFilter::new().with_query("GARDEN")), vec!["3"]);
        assert_eq!(ids(&catalog, &ProductFilter::new().with_query("wireless")), vec!["1", "6"]);
    }

    #[test]
    fn test_blank_query_ignored() {
        let filter = ProductFilter::new().with_query("   ");
        assert!(filter.query.is_none());
    }

    #[test]
    fn test_category_filter_by_slug() {
        let catalog = InMemoryCatalog::demo();
        let filter = ProductFilter::new().toggle_category("home-garden");
        assert_eq!(ids(&catalog, &filter), vec!["3"]);

        let filter = filter.toggle_category("sports");
        assert_eq!(ids(&catalog, &filter), vec!["3", "4"]);

        let filter = filter.toggle_category("home-garden");
        assert_eq!(ids(&catalog, &filter), vec!["4"]);
    }

    #[test]
    fn test_price_range_inclusive() {
        let catalog = InMemoryCatalog::demo();
        let filter =
            ProductFilter::new().with_price_range(PriceRange::new(usd(89.99), usd(199.99)));
        assert_eq!(ids(&catalog, &filter), vec!["2", "4", "5"]);
    }

    #[test]
    fn test_price_range_swaps_bounds() {
        let range = PriceRange::new(usd(100.0), usd(10.0));
        assert_eq!(range.min, usd(10.0));
        assert_eq!(range.max, usd(100.0));
    }

    #[test]
    fn test_brand_stock_and_sale_filters() {
        let catalog = InMemoryCatalog::demo();
        let filter = ProductFilter::new().toggle_brand("FitTech").toggle_brand("RunFast");
        assert_eq!(ids(&catalog, &filter), vec!["2", "4"]);

        let filter = ProductFilter::new().on_sale_only(true);
        assert_eq!(ids(&catalog, &filter), vec!["1", "3", "5"]);

        let sold_out = crate::catalog::Product::new("x", "Gone", usd(5.0)).with_stock(0);
        assert!(!ProductFilter::new().in_stock_only(true).matches(&sold_out));
        assert!(ProductFilter::new().matches(&sold_out));
    }

    #[test]
    fn test_active_filters_and_clear() {
        let filter = ProductFilter::new().with_query("shoe");
        assert!(!filter.has_active_filters());

        let filter = filter.toggle_brand("RunFast").in_stock_only(true);
        assert!(filter.has_active_filters());

        let cleared = filter.cleared();
        assert!(!cleared.has_active_filters());
        assert_eq!(cleared.query.as_deref(), Some("shoe"));
    }
}
