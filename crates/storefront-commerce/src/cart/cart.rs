//! Cart and line item types.
//!
//! A [`Cart`] is an immutable value. Every command returns a new cart with
//! its totals recomputed from the line items, so a cart can never carry
//! totals that disagree with its contents.

use crate::cart::CartTotals;
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A line item in the cart: one product and how many of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Snapshot of the product at the time it was added.
    pub product: Product,
    /// Quantity, always at least 1.
    pub quantity: u64,
}

impl LineItem {
    /// Product ID of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_mul(self.quantity)
    }

    /// Whether the quantity exceeds what the product has in stock.
    pub fn exceeds_stock(&self) -> bool {
        !self.product.can_fulfil(self.quantity)
    }
}

/// A command against the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add `quantity` units of a product, merging with an existing line.
    AddItem { product: Product, quantity: i64 },
    /// Remove a product's line.
    RemoveItem { product_id: ProductId },
    /// Set a line's quantity; zero or less removes the line.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Empty the cart.
    Clear,
}

impl CartAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartAction::AddItem { .. } => "add_item",
            CartAction::RemoveItem { .. } => "remove_item",
            CartAction::UpdateQuantity { .. } => "update_quantity",
            CartAction::Clear => "clear",
        }
    }
}

/// Item list used to rebuild a cart on deserialization.
#[derive(Deserialize)]
struct CartContents {
    #[serde(default)]
    currency: Currency,
    #[serde(default)]
    items: Vec<LineItem>,
}

impl From<CartContents> for Cart {
    fn from(contents: CartContents) -> Self {
        let items = contents
            .items
            .into_iter()
            .filter(|item| item.quantity > 0)
            .fold(Vec::<LineItem>::new(), |mut acc, item| {
                match acc.iter_mut().find(|l| l.product.id == item.product.id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                    None => acc.push(item),
                }
                acc
            });
        Cart::from_items(contents.currency, items)
    }
}

/// A shopping cart.
///
/// Fields are private: the only way to obtain a cart is through a
/// constructor or a command, both of which recompute the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CartContents")]
pub struct Cart {
    currency: Currency,
    items: Vec<LineItem>,
    #[serde(flatten)]
    totals: CartTotals,
}

impl Cart {
    /// Create an empty cart priced in US dollars.
    pub fn new() -> Self {
        Self::with_currency(Currency::USD)
    }

    /// Create an empty cart in the given currency.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
            totals: CartTotals::zero(currency),
        }
    }

    fn from_items(currency: Currency, items: Vec<LineItem>) -> Self {
        let totals = CartTotals::compute(&items, currency);
        Self {
            currency,
            items,
            totals,
        }
    }

    /// Apply a command and return the resulting cart.
    pub fn apply(&self, action: CartAction) -> Cart {
        match action {
            CartAction::AddItem { product, quantity } => self.add_item(&product, quantity),
            CartAction::RemoveItem { product_id } => self.remove_item(&product_id),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.set_quantity(&product_id, quantity),
            CartAction::Clear => self.clear(),
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line for the same product has its quantity increased;
    /// otherwise a new line is appended. A quantity of zero or less leaves
    /// the cart unchanged. Stock is not checked here.
    ///
    /// The product must be priced in the cart's currency; amounts are not
    /// converted.
    pub fn add_item(&self, product: &Product, quantity: i64) -> Cart {
        debug_assert_eq!(
            product.price.currency, self.currency,
            "product {} is not priced in the cart currency",
            product.id
        );
        let Ok(quantity) = u64::try_from(quantity) else {
            return self.clone();
        };
        if quantity == 0 {
            return self.clone();
        }

        let mut items = self.items.clone();
        match items.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => items.push(LineItem {
                product: product.clone(),
                quantity,
            }),
        }
        Cart::from_items(self.currency, items)
    }

    /// Add a single unit of a product.
    pub fn add_one(&self, product: &Product) -> Cart {
        self.add_item(product, 1)
    }

    /// Remove a product's line. Absent products are a no-op.
    pub fn remove_item(&self, product_id: &ProductId) -> Cart {
        let items = self
            .items
            .iter()
            .filter(|l| &l.product.id != product_id)
            .cloned()
            .collect();
        Cart::from_items(self.currency, items)
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less is exactly [`Cart::remove_item`]. Absent
    /// products are a no-op.
    pub fn set_quantity(&self, product_id: &ProductId, quantity: i64) -> Cart {
        let quantity = match u64::try_from(quantity) {
            Ok(q) if q > 0 => q,
            _ => return self.remove_item(product_id),
        };

        let items = self
            .items
            .iter()
            .map(|l| {
                if &l.product.id == product_id {
                    LineItem {
                        product: l.product.clone(),
                        quantity,
                    }
                } else {
                    l.clone()
                }
            })
            .collect();
        Cart::from_items(self.currency, items)
    }

    /// An empty cart with all totals zero.
    pub fn clear(&self) -> Cart {
        Cart::with_currency(self.currency)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line items, in the order products were first added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the line for a product.
    pub fn line(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|l| &l.product.id == product_id)
    }

    /// Lines whose quantity is more than the product has in stock.
    ///
    /// Informational: the cart accepts these lines.
    pub fn stock_shortfalls(&self) -> Vec<&LineItem> {
        self.items.iter().filter(|l| l.exceeds_stock()).collect()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// All derived totals.
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    pub fn subtotal(&self) -> Money {
        self.totals.subtotal
    }

    pub fn tax(&self) -> Money {
        self.totals.tax
    }

    pub fn shipping(&self) -> Money {
        self.totals.shipping
    }

    pub fn total(&self) -> Money {
        self.totals.total
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
