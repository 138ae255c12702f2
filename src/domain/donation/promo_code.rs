//! Promo code entity.
//!
//! A promo code grants a percentage discount on a donation's resolved base
//! amount. Codes are unique, normalized to uppercase, and at most 20
//! characters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Amount, DiscountPercent, PromoCodeId, ValidationError};

/// Maximum stored length of a promo code.
const MAX_CODE_LENGTH: usize = 20;

/// A percentage-discount code applied to a donation's base amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: PromoCodeId,
    code: String,
    pub discount: DiscountPercent,
}

impl PromoCode {
    /// Creates a PromoCode, validating and normalizing the code string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the code is empty, longer than 20
    /// characters, or contains anything other than ASCII alphanumerics and
    /// hyphens.
    pub fn try_new(
        code: impl Into<String>,
        discount: DiscountPercent,
    ) -> Result<Self, ValidationError> {
        let code = code.into().trim().to_uppercase();
        if code.is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        if code.len() > MAX_CODE_LENGTH {
            return Err(ValidationError::out_of_range(
                "code_length",
                1,
                MAX_CODE_LENGTH as i32,
                code.len() as i32,
            ));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ValidationError::invalid_format(
                "code",
                "alphanumeric characters and hyphens only",
            ));
        }
        Ok(Self {
            id: PromoCodeId::new(),
            code,
            discount,
        })
    }

    /// Reconstitutes a PromoCode from stored state.
    ///
    /// Used by persistence adapters; the stored code is trusted to have been
    /// validated at creation.
    pub fn from_stored(id: PromoCodeId, code: String, discount: DiscountPercent) -> Self {
        Self { id, code, discount }
    }

    /// Returns the normalized code string.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Applies this code's discount to an amount.
    ///
    /// The result is rounded to the cent with half-up behavior and is always
    /// in `[0, amount]`. The `Amount` invariant (non-negative, two decimal
    /// places) makes the fallback construction infallible.
    pub fn apply(&self, amount: Amount) -> Amount {
        let discounted = self.discount.apply_to(amount.value());
        Amount::try_new(discounted).unwrap_or(Amount::ZERO)
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.discount)
    }
}
