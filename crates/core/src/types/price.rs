//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept exact through every sum and product. Rounding to cents
//! happens only in [`Price::display`].

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("price is not a decimal number: {0}")]
    Malformed(String),
}

/// A non-negative amount in US dollars.
///
/// Serialized as a decimal string (`"9.99"`) so no precision is lost on the
/// wire. Deserialization also accepts JSON numbers for hand-written payloads,
/// and goes through [`Price::new`], so a negative amount never loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        // Folds a negative zero into plain zero.
        Ok(if amount.is_zero() { Self::ZERO } else { Self(amount) })
    }

    /// Create a price from a whole number of cents.
    ///
    /// Negative counts clamp to zero.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents.max(0), 2))
    }

    /// The exact decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiply by a quantity without rounding.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display, e.g. `$42.96`.
    ///
    /// Half-cents round away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|e| PriceError::Malformed(e.to_string()))?;
        Self::new(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_many_small_amounts_stay_exact() {
        let dime = Price::from_cents(10);
        let total: Price = std::iter::repeat_n(dime, 1000).sum();
        assert_eq!(total, Price::from_cents(10_000));
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::from_cents(1099).times(3), Price::from_cents(3297));
        assert_eq!(Price::from_cents(1099).times(0), Price::ZERO);
    }

    #[test]
    fn test_display_rounds_only_at_the_end() {
        assert_eq!(Price::from_cents(4296).display(), "$42.96");
        assert_eq!(Price::from_cents(500).display(), "$5.00");
        assert_eq!(Price::new(Decimal::new(12345, 3)).unwrap().display(), "$12.35");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Price::from_cents(999)).unwrap();
        assert_eq!(json, "\"9.99\"");

        let from_str: Price = serde_json::from_str("\"14.95\"").unwrap();
        assert_eq!(from_str, Price::from_cents(1495));

        let from_number: Price = serde_json::from_str("12.99").unwrap();
        assert_eq!(from_number, Price::from_cents(1299));
    }

    #[test]
    fn test_negative_amounts_are_rejected() {
        assert_eq!(
            Price::new(Decimal::new(-500, 2)),
            Err(PriceError::Negative(Decimal::new(-500, 2)))
        );
        assert!(serde_json::from_str::<Price>("\"-5.00\"").is_err());
        assert!(serde_json::from_str::<Price>("-0.01").is_err());

        // Zero is a valid price, whatever its sign.
        assert_eq!(serde_json::from_str::<Price>("\"-0\"").unwrap(), Price::ZERO);
        assert_eq!(Price::from_cents(-100), Price::ZERO);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(" 7.50 ".parse::<Price>().unwrap(), Price::from_cents(750));
        assert!(matches!("free".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("-1".parse::<Price>(), Err(PriceError::Negative(_))));
    }
}
