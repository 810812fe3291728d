//! Type-safe price representation using decimal arithmetic.
//!
//! The backend serializes prices as plain JSON numbers in the store
//! currency's standard unit. `rust_decimal` keeps line-total and cart-total
//! arithmetic exact; never use floats for money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for a quantity of items at this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times() {
        let price = Price::from(1000);
        assert_eq!(price.times(2), Price::from(2000));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from(2000), Price::from(500)].into_iter().sum();
        assert_eq!(total, Price::from(2500));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from(1000).to_string(), "1000.00");
    }

    #[test]
    fn test_deserialize_plain_number() {
        let price: Price = serde_json::from_str("2500").unwrap();
        assert_eq!(price, Price::from(2500));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&Price::from(1000)).unwrap();
        assert_eq!(json, "1000.0");
    }
}
