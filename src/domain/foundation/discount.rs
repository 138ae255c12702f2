//! Discount percentage value object (0-100 scale).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::round_to_cents;
use super::ValidationError;

/// A percentage discount between 0 and 100 inclusive.
///
/// 0 means no discount; 100 means free. Fractional percents (e.g. `12.5`)
/// are supported, and all discount math stays in decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// No discount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Full discount (free).
    pub const HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a DiscountPercent, returning error if outside 0-100.
    pub fn try_new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() || value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::out_of_range(
                "discount_percent",
                0,
                100,
                value.to_i32().unwrap_or(i32::MAX),
            ));
        }
        Ok(Self(value))
    }

    /// Creates a DiscountPercent from a whole-number percent.
    pub fn from_whole(value: u8) -> Result<Self, ValidationError> {
        Self::try_new(Decimal::from(value))
    }

    /// Returns the percent value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// True when the discount leaves the amount unchanged.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True when the discount makes the amount free.
    pub fn is_full(&self) -> bool {
        self.0 == Decimal::ONE_HUNDRED
    }

    /// Applies this discount to a decimal amount.
    ///
    /// Computes `amount * (1 - percent / 100)` in decimal arithmetic and
    /// rounds half-up at the cent boundary. The result is always in
    /// `[0, amount]`.
    pub fn apply_to(&self, amount: Decimal) -> Decimal {
        let multiplier = Decimal::ONE - self.0 / Decimal::ONE_HUNDRED;
        round_to_cents(amount * multiplier)
    }
}

impl Default for DiscountPercent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
