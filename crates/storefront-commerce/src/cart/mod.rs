//! Shopping cart module.
//!
//! Contains the cart ledger, its totals, and the store that owns the
//! current cart.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, CartAction, LineItem};
pub use pricing::{
    shipping_for, CartTotals, FLAT_SHIPPING_RATE, FREE_SHIPPING_THRESHOLD, TAX_RATE_BPS,
};
pub use store::{CartNotice, CartStore, MAX_HISTORY};
