//! Donation type catalog: tiers and their purchasable options.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    Amount, DonationTypeId, DonationTypeOptionId, ValidationError,
};

/// A named tier in the donation catalog (e.g. "Sustaining Member").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationType {
    pub id: DonationTypeId,
    pub name: String,
}

impl DonationType {
    /// Creates a DonationType with a non-empty name.
    pub fn try_new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: DonationTypeId::new(),
            name,
        })
    }
}

impl fmt::Display for DonationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A purchasable instance of a tier: a fixed amount plus an optional
/// repeat schedule.
///
/// `repeat_count` of zero means a one-time donation. A non-zero count
/// schedules that many additional billing cycles, each
/// `months_per_installment` months apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationTypeOption {
    pub id: DonationTypeOptionId,
    pub donation_type: DonationTypeId,
    pub amount: Amount,
    pub months_per_installment: u32,
    pub repeat_count: u32,
}

impl DonationTypeOption {
    /// Creates an option with a positive amount and a sane schedule.
    pub fn try_new(
        donation_type: DonationTypeId,
        amount: Amount,
        months_per_installment: u32,
        repeat_count: u32,
    ) -> Result<Self, ValidationError> {
        if !amount.is_positive() {
            return Err(ValidationError::invalid_format(
                "amount",
                "catalog amount must be positive",
            ));
        }
        if months_per_installment == 0 {
            return Err(ValidationError::out_of_range(
                "months_per_installment",
                1,
                i32::MAX,
                0,
            ));
        }
        Ok(Self {
            id: DonationTypeOptionId::new(),
            donation_type,
            amount,
            months_per_installment,
            repeat_count,
        })
    }

    /// Convenience constructor for a one-time option.
    pub fn one_time(
        donation_type: DonationTypeId,
        amount: Amount,
    ) -> Result<Self, ValidationError> {
        Self::try_new(donation_type, amount, 1, 0)
    }

    /// Reconstitutes an option from stored state.
    ///
    /// Used by persistence adapters; performs no validation.
    pub fn from_stored(
        id: DonationTypeOptionId,
        donation_type: DonationTypeId,
        amount: Amount,
        months_per_installment: u32,
        repeat_count: u32,
    ) -> Self {
        Self {
            id,
            donation_type,
            amount,
            months_per_installment,
            repeat_count,
        }
    }

    /// True when this option schedules additional billing cycles.
    pub fn is_repeating(&self) -> bool {
        self.repeat_count > 0
    }

    /// Length of one billing cycle in days (30-day months).
    pub fn cycle_days(&self) -> i64 {
        i64::from(self.months_per_installment) * 30
    }
}

impl fmt::Display for DonationTypeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.donation_type, self.amount)
    }
}
