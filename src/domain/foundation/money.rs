//! Monetary amount value object.
//!
//! All charge amounts in the system flow through [`Amount`], which keeps
//! currency math in decimal arithmetic end to end. Binary floating point is
//! never used for money: the same inputs must always produce the same cents,
//! or charge records and gateway requests drift apart.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A non-negative US dollar amount, normalized to 2 decimal places.
///
/// Construction rounds to the cent boundary using half-up rounding, so
/// `10.005` becomes `10.01` and `10.004` becomes `10.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates an Amount, rejecting negative values.
    pub fn try_new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::invalid_format(
                "amount",
                "must not be negative",
            ));
        }
        Ok(Self(round_to_cents(value)))
    }

    /// Creates an Amount from whole dollars.
    pub fn from_dollars(dollars: u32) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Parses an Amount from a decimal string such as `"50"` or `"12.50"`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = Decimal::from_str(input.trim()).map_err(|_| {
            ValidationError::invalid_format("amount", format!("'{}' is not a number", input))
        })?;
        Self::try_new(value)
    }

    /// Returns the inner decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// True for an amount of exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True for a strictly positive amount.
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero()
    }
}

/// Rounds to 2 decimal places with half-up behavior at the cent boundary.
pub(crate) fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn amount_accepts_zero() {
        let amount = Amount::try_new(Decimal::ZERO).unwrap();
        assert!(amount.is_zero());
        assert!(!amount.is_positive());
    }

    #[test]
    fn amount_rejects_negative_values() {
        let result = Amount::try_new(dec("-0.01"));
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn amount_rounds_half_up_at_cent_boundary() {
        assert_eq!(Amount::try_new(dec("10.005")).unwrap().value(), dec("10.01"));
        assert_eq!(Amount::try_new(dec("10.004")).unwrap().value(), dec("10.00"));
    }

    #[test]
    fn amount_from_dollars_is_exact() {
        assert_eq!(Amount::from_dollars(50).value(), dec("50"));
    }

    #[test]
    fn amount_parses_plain_and_fractional_input() {
        assert_eq!(Amount::parse("50").unwrap(), Amount::from_dollars(50));
        assert_eq!(Amount::parse(" 12.50 ").unwrap().value(), dec("12.50"));
    }

    #[test]
    fn amount_parse_rejects_garbage() {
        assert!(Amount::parse("fifty dollars").is_err());
        assert!(Amount::parse("").is_err());
    }

    #[test]
    fn amount_parse_rejects_negative() {
        assert!(Amount::parse("-5").is_err());
    }

    #[test]
    fn amount_displays_with_two_decimal_places() {
        assert_eq!(format!("{}", Amount::from_dollars(50)), "50.00");
        assert_eq!(format!("{}", Amount::parse("0.9").unwrap()), "0.90");
    }

    #[test]
    fn amount_serializes_as_plain_decimal() {
        let amount = Amount::parse("87.00").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn amount_equality_ignores_trailing_zero_representation() {
        // 50 and 50.00 must be the same amount after normalization.
        let a = Amount::parse("50").unwrap();
        let b = Amount::parse("50.00").unwrap();
        assert_eq!(a, b);
    }
}
