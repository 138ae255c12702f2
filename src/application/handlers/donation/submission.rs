//! Donation submission input structure.
//!
//! One composite struct of plain sub-structs, mirroring the donor, address,
//! donation, and payment sections of the donation form. Fields arrive as the
//! raw strings the web layer collected; validation parses them into domain
//! value objects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::donation::AccountProfile;
use crate::domain::foundation::DonationTypeOptionId;

/// Donor identity fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorFields {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// One address section. Blank in all fields means "no address supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFields {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl AddressFields {
    /// True when the donor left the whole section empty.
    pub fn is_blank(&self) -> bool {
        self.street.trim().is_empty()
            && self.city.trim().is_empty()
            && self.state.trim().is_empty()
            && self.postal_code.trim().is_empty()
    }
}

/// Donation amount and catalog selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationFields {
    /// Free-form amount input; empty when the donor picked a tier instead.
    pub amount: String,
    pub donation_type_option: Option<DonationTypeOptionId>,
    pub promo_code: String,
    pub attribution: String,
    pub anonymous: bool,
}

/// Raw payment-detail fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFields {
    pub card_number: String,
    pub security_code: String,
    pub expiration_month: String,
    pub expiration_year: String,
}

/// A full donation form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationSubmission {
    pub donor: DonorFields,
    /// The signed-in account, when there is one; used for name default-fill.
    pub account: Option<AccountProfile>,
    pub billing_address: AddressFields,
    pub mailing_address: AddressFields,
    pub mailing_same_as_billing: bool,
    pub donation: DonationFields,
    pub payment: PaymentFields,
    /// Set when the donor has accepted the confirmation preview.
    pub confirmed: bool,
}

impl DonationSubmission {
    /// Payment fields that must never be echoed back to the client.
    pub const SENSITIVE_FIELDS: &'static [&'static str] = &["card_number", "security_code"];

    /// Returns this submission with sensitive payment fields blanked.
    ///
    /// Applied to every submission that goes back out for redisplay; raw
    /// card credentials never leave the workflow.
    pub fn scrubbed(mut self) -> Self {
        self.payment.card_number = String::new();
        self.payment.security_code = String::new();
        self
    }
}

/// Field-level validation errors, keyed by field name.
///
/// Ordered map so redisplayed errors come out in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// True when no errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages for one field.
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when the field has at least one error.
    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Total number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}
