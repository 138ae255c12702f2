//! Payment backend port: the pluggable purchase strategy.
//!
//! A backend turns a validated donation plus submitted card details into an
//! actual charge: always the one-time capture first, then — only when that
//! succeeded and the donation repeats — a recurring-subscription call.
//!
//! # Contract
//!
//! - `purchase` returns a [`PurchaseResult`] for every gateway outcome,
//!   including declines, network failures, and timeouts. `Err` is reserved
//!   for programmer errors (a repeating donation with no schedule, broken
//!   wiring) and never represents a payment outcome.
//! - A failed one-time charge ends the purchase: no recurring attempt, no
//!   processed flag, `recurring` absent from the result.
//! - A failed recurring call after a successful capture does **not** unset
//!   the processed flag or flip the top-level status; the initial charge
//!   already happened and is never reversed here. The caller surfaces the
//!   subscription outcome separately from `recurring`.
//! - On success the backend marks the donation processed, persists that
//!   transition, and notifies the observer list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::donation::{CardDetails, Donation, DonationError, Donor};

use super::payment_gateway::GatewayResponse;

/// Payment-detail fields a backend needs collected and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentField {
    CardNumber,
    SecurityCode,
    ExpirationMonth,
    ExpirationYear,
}

/// Capability negotiation between a backend and the workflow controller.
///
/// This declares which payment fields must be present in a submission; it is
/// not a UI concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormContract {
    pub required_fields: Vec<PaymentField>,
}

impl FormContract {
    /// The standard card-payment contract.
    pub fn card_payment() -> Self {
        Self {
            required_fields: vec![
                PaymentField::CardNumber,
                PaymentField::SecurityCode,
                PaymentField::ExpirationMonth,
                PaymentField::ExpirationYear,
            ],
        }
    }

    pub fn requires(&self, field: PaymentField) -> bool {
        self.required_fields.contains(&field)
    }
}

/// Outcome of the recurring-subscription call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringResult {
    pub status: bool,
    pub reason: String,
    pub response: GatewayResponse,
}

/// Outcome of a purchase.
///
/// `status` reflects the one-time charge only. `recurring` is present only
/// when a subscription call was attempted, which requires the one-time
/// charge to have succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseResult {
    pub status: bool,
    pub reason: String,
    pub response: GatewayResponse,
    pub recurring: Option<RecurringResult>,
}

impl PurchaseResult {
    /// A successful one-time charge.
    pub fn succeeded(response: GatewayResponse) -> Self {
        Self {
            status: true,
            reason: response.reason.clone(),
            response,
            recurring: None,
        }
    }

    /// A failed one-time charge.
    pub fn failed(reason: impl Into<String>, response: GatewayResponse) -> Self {
        Self {
            status: false,
            reason: reason.into(),
            response,
            recurring: None,
        }
    }

    /// Attaches the recurring-call outcome without touching `status`.
    pub fn with_recurring(mut self, recurring: RecurringResult) -> Self {
        self.recurring = Some(recurring);
        self
    }
}

/// Port for pluggable payment backends.
///
/// All backend variants satisfy this same contract; selection is
/// configuration-driven through the backend registry.
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    /// Declares which payment fields the workflow must collect.
    fn form_contract(&self) -> FormContract;

    /// Runs the full charge sequence for a donation.
    ///
    /// # Errors
    ///
    /// Only programmer errors: gateway outcomes of every kind come back in
    /// the `PurchaseResult`.
    async fn purchase(
        &self,
        donation: &mut Donation,
        donor: &Donor,
        card: &CardDetails,
    ) -> Result<PurchaseResult, DonationError>;
}
