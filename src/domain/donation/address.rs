//! US postal address and phone value objects.
//!
//! Addressing is intentionally US-only: the state field is a validated
//! two-letter code and postal codes are ZIP or ZIP+4. Donors may omit an
//! address entirely, but a started address must be complete.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Two-letter US state and territory codes accepted in addresses.
const US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "AS", "GU", "MP", "PR", "VI",
];

/// A complete US mailing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    city: String,
    state: String,
    postal_code: String,
}

impl Address {
    /// Creates an Address, validating every field.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any field is empty, the state is not a
    /// known two-letter code, or the postal code is not ZIP / ZIP+4.
    pub fn try_new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let street = street.into().trim().to_string();
        if street.is_empty() {
            return Err(ValidationError::empty_field("street"));
        }

        let city = city.into().trim().to_string();
        if city.is_empty() {
            return Err(ValidationError::empty_field("city"));
        }

        let state = state.into().trim().to_uppercase();
        if state.is_empty() {
            return Err(ValidationError::empty_field("state"));
        }
        if !US_STATE_CODES.contains(&state.as_str()) {
            return Err(ValidationError::invalid_format(
                "state",
                format!("'{}' is not a US state code", state),
            ));
        }

        let postal_code = postal_code.into().trim().to_string();
        if postal_code.is_empty() {
            return Err(ValidationError::empty_field("postal_code"));
        }
        if !is_valid_zip(&postal_code) {
            return Err(ValidationError::invalid_format(
                "postal_code",
                "expected ZIP or ZIP+4",
            ));
        }

        Ok(Self {
            street,
            city,
            state,
            postal_code,
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.street, self.city, self.state, self.postal_code
        )
    }
}

/// ZIP (5 digits) or ZIP+4 (5 digits, hyphen, 4 digits).
fn is_valid_zip(code: &str) -> bool {
    let bytes = code.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        10 => {
            bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[5] == b'-'
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// A US phone number, stored as exactly ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Creates a Phone from user input, stripping common separators.
    pub fn try_new(input: impl Into<String>) -> Result<Self, ValidationError> {
        let digits: String = input
            .into()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return Err(ValidationError::empty_field("phone"));
        }
        if digits.len() != 10 {
            return Err(ValidationError::invalid_format(
                "phone",
                "expected a ten-digit US phone number",
            ));
        }
        Ok(Self(digits))
    }

    /// Returns the bare digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
