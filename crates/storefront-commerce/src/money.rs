//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
/// Arithmetic saturates at the `i64` bounds instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Rounds half away from zero at the smallest unit.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let scaled = amount * currency.minor_per_major() as f64;
        // `as` saturates on overflow and maps NaN to zero.
        Self::new(scaled.round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "$1,049.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.format_abs())
    }

    /// Format as a display string without symbol or grouping (e.g., "1049.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let places = self.currency.decimal_places() as usize;
        let (major, minor) = self.split_abs();
        if places == 0 {
            format!("{}{}", sign, major)
        } else {
            format!("{}{}.{:0places$}", sign, major, minor)
        }
    }

    fn split_abs(&self) -> (u64, u64) {
        let abs = self.amount_cents.unsigned_abs();
        let per = self.currency.minor_per_major() as u64;
        (abs / per, abs % per)
    }

    fn format_abs(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        let (major, minor) = self.split_abs();

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if places == 0 {
            grouped
        } else {
            format!("{}.{:0places$}", grouped, minor)
        }
    }

    /// Try to add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        ))
    }

    /// Add an amount of the same currency, saturating on overflow.
    ///
    /// The other value's currency is ignored; callers keep a single currency.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        )
    }

    /// Multiply by a quantity, saturating on overflow.
    pub fn saturating_mul(&self, factor: u64) -> Money {
        let factor = i64::try_from(factor).unwrap_or(i64::MAX);
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Apply a rate given in basis points (1/100 of a percent).
    ///
    /// The result is rounded half away from zero to the smallest unit.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let subtotal = Money::new(3000, Currency::USD);
    /// assert_eq!(subtotal.apply_rate_bps(800).amount_cents, 240);
    /// ```
    pub fn apply_rate_bps(&self, bps: i64) -> Money {
        let product = self.amount_cents as i128 * bps as i128;
        let quotient = product / 10_000;
        let remainder = product % 10_000;
        let rounded = if remainder.abs() * 2 >= 10_000 {
            quotient + product.signum()
        } else {
            quotient
        };
        let clamped = rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Money::new(clamped, self.currency)
    }

    /// Sum an iterator of Money values in the given currency.
    pub fn sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Money {
        iter.fold(Money::zero(currency), |acc, m| acc.saturating_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(&other)
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, factor: u64) -> Money {
        self.saturating_mul(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(299.99, Currency::USD);
        assert_eq!(m.amount_cents, 29999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100); // JPY has no decimals
    }

    #[test]
    fn test_money_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(0.125, Currency::USD).amount_cents, 13);
        assert_eq!(Money::from_decimal(-0.125, Currency::USD).amount_cents, -13);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(104999, Currency::USD).display(), "$1,049.99");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(-500, Currency::USD).display(), "-$5.00");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_display_amount() {
        assert_eq!(Money::new(104999, Currency::USD).display_amount(), "1049.99");
        assert_eq!(Money::new(0, Currency::USD).display_amount(), "0.00");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!((a + b).amount_cents, 1500);
    }

    #[test]
    fn test_money_addition_saturates() {
        let a = Money::new(i64::MAX, Currency::USD);
        let b = Money::new(1, Currency::USD);
        assert_eq!((a + b).amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_try_add_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::new(1000, Currency::USD);
        assert_eq!((m * 3).amount_cents, 3000);
        assert_eq!(m.saturating_mul(u64::MAX).amount_cents, i64::MAX);
    }

    #[test]
    fn test_apply_rate_bps_rounding() {
        // 8% of $0.06 = 0.48 cents -> 0
        assert_eq!(Money::new(6, Currency::USD).apply_rate_bps(800).amount_cents, 0);
        // 8% of $0.07 = 0.56 cents -> 1
        assert_eq!(Money::new(7, Currency::USD).apply_rate_bps(800).amount_cents, 1);
        // 8% of $1,000.00 = $80.00
        assert_eq!(Money::new(100000, Currency::USD).apply_rate_bps(800).amount_cents, 8000);
        // 50% of 3 cents = 1.5 -> 2
        assert_eq!(Money::new(3, Currency::USD).apply_rate_bps(5000).amount_cents, 2);
        assert_eq!(Money::new(-3, Currency::USD).apply_rate_bps(5000).amount_cents, -2);
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::new(100, Currency::USD), Money::new(250, Currency::USD)];
        assert_eq!(Money::sum(values.iter(), Currency::USD).amount_cents, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
