//! The owner of the current cart.
//!
//! A UI holds exactly one [`CartStore`] and passes it (or the cart snapshots
//! it hands out) to whatever needs them. There is no global cart.

use std::collections::VecDeque;

use crate::cart::{Cart, CartAction};
use crate::checkout::{BillingDetails, Checkout, Order, PaymentGateway};
use crate::error::CommerceError;
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Number of previous snapshots kept for undo.
pub const MAX_HISTORY: usize = 50;

/// A user-facing notification produced by a cart command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartNotice {
    pub title: String,
    pub description: String,
}

impl CartNotice {
    fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    fn for_action(action: &CartAction) -> Option<Self> {
        match action {
            CartAction::AddItem { product, .. } => Some(Self::new(
                "Added to cart",
                format!("{} has been added to your cart.", product.name),
            )),
            CartAction::RemoveItem { .. } => Some(Self::new(
                "Removed from cart",
                "Item has been removed from your cart.",
            )),
            CartAction::Clear => Some(Self::new(
                "Cart cleared",
                "All items have been removed from your cart.",
            )),
            CartAction::UpdateQuantity { .. } => None,
        }
    }
}

/// Holds the current cart and its undo history.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Cart,
    history: VecDeque<Cart>,
}

impl CartStore {
    /// Create a store with an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with an empty cart in the given currency.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            cart: Cart::with_currency(currency),
            history: VecDeque::new(),
        }
    }

    /// The current cart snapshot.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Units in the cart, for badge counts.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Apply a command, replacing the current cart.
    ///
    /// Returns the notification to show, if the command has one.
    pub fn dispatch(&mut self, action: CartAction) -> Option<CartNotice> {
        let notice = CartNotice::for_action(&action);
        let kind = action.as_str();
        let next = self.cart.apply(action);

        tracing::debug!(
            action = kind,
            items = next.item_count(),
            total = %next.total(),
            "cart updated"
        );

        if next != self.cart {
            let previous = std::mem::replace(&mut self.cart, next);
            self.history.push_back(previous);
            if self.history.len() > MAX_HISTORY {
                self.history.pop_front();
            }
        }

        notice
    }

    /// Restore the previous snapshot. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.cart = previous;
                true
            }
            None => false,
        }
    }

    /// Number of snapshots available to undo.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear the cart after a confirmed payment.
    pub fn checkout_succeeded(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Run checkout against the current cart.
    ///
    /// The cart is cleared only when the gateway confirms payment; on any
    /// error it is left exactly as it was.
    pub async fn checkout<G>(
        &mut self,
        billing: BillingDetails,
        gateway: &G,
    ) -> Result<Order, CommerceError>
    where
        G: PaymentGateway + ?Sized,
    {
        let receipt = Checkout::place_order(&self.cart, billing, gateway).await?;
        self.checkout_succeeded();
        Ok(receipt.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Money;

    fn product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Item {}", id), Money::new(price_cents, Currency::USD))
    }

    #[test]
    fn test_dispatch_add_notifies() {
        let mut store = CartStore::new();
        let notice = store
            .dispatch(CartAction::AddItem {
                product: product("a", 1000),
                quantity: 1,
            })
            .unwrap();
        assert_eq!(notice.title, "Added to cart");
        assert_eq!(notice.description, "Item a has been added to your cart.");
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_update_quantity_is_silent() {
        let mut store = CartStore::new();
        let a = product("a", 1000);
        store.dispatch(CartAction::AddItem {
            product: a.clone(),
            quantity: 1,
        });
        let notice = store.dispatch(CartAction::UpdateQuantity {
            product_id: a.id.clone(),
            quantity: 4,
        });
        assert!(notice.is_none());
        assert_eq!(store.item_count(), 4);
    }

    #[test]
    fn test_undo() {
        let mut store = CartStore::new();
        let a = product("a", 1000);
        store.dispatch(CartAction::AddItem {
            product: a.clone(),
            quantity: 2,
        });
        store.dispatch(CartAction::Clear);
        assert!(store.cart().is_empty());

        assert!(store.undo());
        assert_eq!(store.item_count(), 2);
        assert!(store.undo());
        assert!(store.cart().is_empty());
        assert!(!store.undo());
    }

    #[test]
    fn test_noop_commands_not_recorded() {
        let mut store = CartStore::new();
        store.dispatch(CartAction::RemoveItem {
            product_id: "missing".into(),
        });
        store.dispatch(CartAction::Clear);
        assert_eq!(store.history_len(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut store = CartStore::new();
        let a = product("a", 100);
        for _ in 0..(MAX_HISTORY + 10) {
            store.dispatch(CartAction::AddItem {
                product: a.clone(),
                quantity: 1,
            });
        }
        assert_eq!(store.history_len(), MAX_HISTORY);
    }

    #[test]
    fn test_bounded_history_drops_oldest() {
        let mut store = CartStore::new();
        let a = product("a", 100);
        for _ in 0..(MAX_HISTORY + 10) {
            store.dispatch(CartAction::AddItem {
                product: a.clone(),
                quantity: 1,
            });
        }

        for _ in 0..MAX_HISTORY {
            assert!(store.undo());
        }
        // snapshots of 0..10 units fell off the front
        assert_eq!(store.item_count(), 10);
        assert!(!store.undo());
    }

    #[test]
    fn test_checkout_succeeded_clears() {
        let mut store = CartStore::new();
        store.dispatch(CartAction::AddItem {
            product: product("a", 100),
            quantity: 1,
        });
        store.checkout_succeeded();
        assert!(store.cart().is_empty());
    }
}
