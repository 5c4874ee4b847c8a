//! Cart totals calculation.

use crate::cart::LineItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Sales tax rate in basis points (8%).
pub const TAX_RATE_BPS: i64 = 800;

/// Subtotals strictly above this amount (in whole currency units) ship free.
pub const FREE_SHIPPING_THRESHOLD: f64 = 50.0;

/// Flat shipping charge (in whole currency units) below the threshold.
pub const FLAT_SHIPPING_RATE: f64 = 9.99;

/// Derived monetary totals of a cart.
///
/// Every field is rounded to the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of price times quantity over all lines.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// Subtotal plus tax plus shipping.
    pub total: Money,
}

impl CartTotals {
    /// All-zero totals, as carried by an empty cart.
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            subtotal: zero,
            tax: zero,
            shipping: zero,
            total: zero,
        }
    }

    /// Compute totals for a list of line items.
    ///
    /// An empty list yields all-zero totals: there is nothing to ship.
    pub fn compute(items: &[LineItem], currency: Currency) -> Self {
        if items.is_empty() {
            return Self::zero(currency);
        }

        let subtotal = items
            .iter()
            .fold(Money::zero(currency), |acc, item| acc.saturating_add(&item.line_total()));
        let tax = subtotal.apply_rate_bps(TAX_RATE_BPS);
        let shipping = shipping_for(&subtotal);
        let total = subtotal.saturating_add(&tax).saturating_add(&shipping);

        Self {
            subtotal,
            tax,
            shipping,
            total,
        }
    }

    /// Whether the order qualifies for free shipping.
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more must be added to qualify for free shipping.
    ///
    /// Zero once the subtotal is above the threshold. Because the comparison
    /// is strict, reaching the threshold exactly still needs one more cent.
    pub fn remaining_for_free_shipping(&self) -> Money {
        let threshold = Money::from_decimal(FREE_SHIPPING_THRESHOLD, self.subtotal.currency);
        let gap = threshold.amount_cents - self.subtotal.amount_cents + 1;
        Money::new(gap.max(0), self.subtotal.currency)
    }
}

/// Shipping charged for a given subtotal.
pub fn shipping_for(subtotal: &Money) -> Money {
    let threshold = Money::from_decimal(FREE_SHIPPING_THRESHOLD, subtotal.currency);
    if subtotal.amount_cents > threshold.amount_cents {
        Money::zero(subtotal.currency)
    } else {
        Money::from_decimal(FLAT_SHIPPING_RATE, subtotal.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_shipping_threshold_is_strict() {
        assert_eq!(shipping_for(&usd(5000)), usd(999));
        assert_eq!(shipping_for(&usd(5001)), usd(0));
        assert_eq!(shipping_for(&usd(4999)), usd(999));
        assert_eq!(shipping_for(&usd(0)), usd(999));
    }

    #[test]
    fn test_zero_totals() {
        let totals = CartTotals::compute(&[], Currency::USD);
        assert_eq!(totals, CartTotals::zero(Currency::USD));
        assert!(totals.ships_free());
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let totals = CartTotals {
            subtotal: usd(3000),
            tax: usd(240),
            shipping: usd(999),
            total: usd(4239),
        };
        assert_eq!(totals.remaining_for_free_shipping(), usd(2001));

        let at_threshold = CartTotals { subtotal: usd(5000), ..totals };
        assert_eq!(at_threshold.remaining_for_free_shipping(), usd(1));

        let above = CartTotals { subtotal: usd(6000), ..totals };
        assert_eq!(above.remaining_for_free_shipping(), usd(0));
    }
}
