//! Payment gateway client port.
//!
//! Defines the contract the payment gateway collaborator must satisfy: a
//! one-time charge call and a recurring-subscription call. The gateway owns
//! its own timeout policy and must resolve every failure — decline, network
//! error, timeout — to an error value. It never hangs the caller and never
//! panics.
//!
//! # Design
//!
//! - **Gateway agnostic**: the request/response types carry only what any
//!   card gateway needs; wire formats live in the adapters
//! - **Status mapping isolated**: interpreting gateway status codes into the
//!   approved/declined indicator happens behind this boundary, so new
//!   gateways implement only the mapping, not the purchase orchestration

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::donation::{Address, CardDetails};
use crate::domain::foundation::Amount;

/// Port for the external payment gateway.
#[async_trait]
pub trait PaymentGatewayClient: Send + Sync {
    /// Captures a single immediate charge.
    async fn charge_once(&self, request: &ChargeRequest)
        -> Result<GatewayResponse, GatewayError>;

    /// Establishes a recurring billing subscription.
    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<GatewayResponse, GatewayError>;
}

/// Billing identity attached to a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<Address>,
}

/// A one-time charge request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub amount: Amount,
    pub card: CardDetails,
    pub billing: BillingInfo,
    /// Free-text line item description, when the gateway supports one.
    pub description: Option<String>,
}

/// A recurring subscription request.
///
/// `total_occurrences` counts the additional billing cycles beyond the
/// initial one-time charge; the first scheduled charge happens at
/// `start_date`, one billing cycle after the initial capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub amount: Amount,
    pub card: CardDetails,
    pub billing: BillingInfo,
    pub interval_months: u32,
    pub total_occurrences: u32,
    pub start_date: NaiveDate,
    pub subscription_name: Option<String>,
}

/// Interpreted gateway response.
///
/// `approved` is the gateway-specific status-code check already applied; the
/// raw payload travels alongside so the presentation layer can surface
/// whatever the gateway said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub approved: bool,
    pub reason: String,
    pub transaction_id: Option<String>,
    pub raw: serde_json::Value,
}

impl GatewayResponse {
    /// An approved response with a transaction id.
    pub fn approved(
        reason: impl Into<String>,
        transaction_id: impl Into<String>,
        raw: serde_json::Value,
    ) -> Self {
        Self {
            approved: true,
            reason: reason.into(),
            transaction_id: Some(transaction_id.into()),
            raw,
        }
    }

    /// A declined or errored response.
    pub fn declined(reason: impl Into<String>, raw: serde_json::Value) -> Self {
        Self {
            approved: false,
            reason: reason.into(),
            transaction_id: None,
            raw,
        }
    }
}

/// Errors from the gateway collaborator.
///
/// These are transport-level failures; a decline is a successful call with
/// `approved == false`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("gateway unreachable: {0}")]
    Network(String),

    #[error("gateway did not respond in time")]
    Timeout,

    #[error("gateway returned an unparseable response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// The reason text surfaced to the user when this error ends a purchase.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
