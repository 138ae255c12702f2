//! Payment card details submitted with a donation.
//!
//! Card data is transient: it is carried through validation and the gateway
//! call, but never persisted and never echoed back to the client. The
//! redisplay scrub for invalid submissions lives with the submission type in
//! the application layer; this module owns the validated value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Card expiration month and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
    pub month: u8,
    pub year: u16,
}

impl Expiration {
    /// Creates an Expiration with a valid calendar month.
    pub fn try_new(month: u8, year: u16) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::out_of_range(
                "expiration_month",
                1,
                12,
                i32::from(month),
            ));
        }
        Ok(Self { month, year })
    }

    /// True when the card has expired as of the given moment.
    ///
    /// A card is valid through the last day of its expiration month.
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        use chrono::Datelike;
        let date = now.date();
        (self.year, self.month) < (date.year() as u16, date.month() as u8)
    }

    /// Formats as `MM-YYYY`, the layout one-time charge requests use.
    pub fn format_month_year(&self) -> String {
        format!("{:02}-{:04}", self.month, self.year)
    }

    /// Formats as `YYYY-MM`, the layout subscription requests use.
    pub fn format_year_month(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Validated payment card details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    number: String,
    security_code: String,
    expiration: Expiration,
}

impl CardDetails {
    /// Creates CardDetails from raw digits.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the card number is not 13-19 digits or
    /// the security code is not 3-4 digits.
    pub fn try_new(
        number: impl Into<String>,
        security_code: impl Into<String>,
        expiration: Expiration,
    ) -> Result<Self, ValidationError> {
        let number: String = number
            .into()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if number.is_empty() {
            return Err(ValidationError::empty_field("card_number"));
        }
        if !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "card_number",
                "digits only",
            ));
        }
        if !(13..=19).contains(&number.len()) {
            return Err(ValidationError::out_of_range(
                "card_number_length",
                13,
                19,
                number.len() as i32,
            ));
        }

        let security_code = security_code.into();
        if security_code.is_empty() {
            return Err(ValidationError::empty_field("security_code"));
        }
        if !security_code.chars().all(|c| c.is_ascii_digit())
            || !(3..=4).contains(&security_code.len())
        {
            return Err(ValidationError::invalid_format(
                "security_code",
                "expected 3 or 4 digits",
            ));
        }

        Ok(Self {
            number,
            security_code,
            expiration,
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn security_code(&self) -> &str {
        &self.security_code
    }

    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    /// Last four digits, for logging and receipts.
    pub fn last_four(&self) -> &str {
        let len = self.number.len();
        &self.number[len - 4..]
    }
}
