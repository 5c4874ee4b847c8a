//! Storefront domain types and logic.
//!
//! This crate provides the core of a small storefront:
//!
//! - **Cart**: an immutable cart ledger with derived totals, plus a store
//!   that owns the current cart on behalf of a UI
//! - **Catalog**: products, categories and catalog providers
//! - **Search**: product filtering and sorting for listings
//! - **Checkout**: billing details, payment gateways and orders
//!
//! # Example
//!
//! ```
//! use storefront_commerce::prelude::*;
//!
//! let tee = Product::new("tee-1", "Plain Tee", Money::from_decimal(10.0, Currency::USD));
//!
//! let cart = Cart::new()
//!     .add_item(&tee, 1)
//!     .add_item(&tee, 2);
//!
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.subtotal().display(), "$30.00");
//! assert_eq!(cart.tax().display(), "$2.40");
//! assert_eq!(cart.shipping().display(), "$9.99");
//! assert_eq!(cart.total().display(), "$42.39");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartAction, CartNotice, CartStore, CartTotals, LineItem};

    // Catalog
    pub use crate::catalog::{CatalogFile, CatalogProvider, Category, InMemoryCatalog, Product};

    // Search
    pub use crate::search::{PriceRange, ProductFilter, SearchQuery, SortOption};

    // Checkout
    pub use crate::checkout::{
        BillingAddress, BillingDetails, Checkout, CheckoutReceipt, Order, OrderItem,
        OrderStatus, PaymentGateway, PaymentIntent, PaymentStatus, SimulatedGateway,
    };
}
