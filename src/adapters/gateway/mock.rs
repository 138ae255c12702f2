//! Mock gateway client for testing.
//!
//! Provides a configurable mock implementation of `PaymentGatewayClient`
//! for unit and integration tests. Supports:
//! - Pre-configured responses per call
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::ports::{
    ChargeRequest, GatewayError, GatewayResponse, PaymentGatewayClient, SubscriptionRequest,
};

/// Mock gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockGatewayClient::approving();
/// mock.decline_next_charge("This transaction has been declined.");
///
/// let result = mock.charge_once(&request).await;
/// assert_eq!(mock.charge_count(), 1);
/// ```
#[derive(Default)]
pub struct MockGatewayClient {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Response for the next charge call; falls back to an approval.
    next_charge: Option<Result<GatewayResponse, GatewayError>>,

    /// Response for the next subscription call; falls back to an approval.
    next_subscription: Option<Result<GatewayResponse, GatewayError>>,

    /// Recorded charge requests.
    charges: Vec<ChargeRequest>,

    /// Recorded subscription requests.
    subscriptions: Vec<SubscriptionRequest>,
}

impl MockGatewayClient {
    /// Creates a mock that approves everything.
    pub fn approving() -> Self {
        Self::default()
    }

    /// Declines the next one-time charge with the given reason.
    pub fn decline_next_charge(&self, reason: &str) {
        self.inner.lock().unwrap().next_charge = Some(Ok(GatewayResponse::declined(
            reason,
            json!({"responseCode": "2"}),
        )));
    }

    /// Fails the next one-time charge with a transport error.
    pub fn error_next_charge(&self, error: GatewayError) {
        self.inner.lock().unwrap().next_charge = Some(Err(error));
    }

    /// Declines the next subscription call with the given reason.
    pub fn decline_next_subscription(&self, reason: &str) {
        self.inner.lock().unwrap().next_subscription = Some(Ok(GatewayResponse::declined(
            reason,
            json!({"resultCode": "Error"}),
        )));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Recorded charge requests.
    pub fn charges(&self) -> Vec<ChargeRequest> {
        self.inner.lock().unwrap().charges.clone()
    }

    /// Number of one-time charge calls.
    pub fn charge_count(&self) -> usize {
        self.inner.lock().unwrap().charges.len()
    }

    /// Recorded subscription requests.
    pub fn subscriptions(&self) -> Vec<SubscriptionRequest> {
        self.inner.lock().unwrap().subscriptions.clone()
    }

    /// Number of subscription calls.
    pub fn subscription_count(&self) -> usize {
        self.inner.lock().unwrap().subscriptions.len()
    }
}

impl Clone for MockGatewayClient {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentGatewayClient for MockGatewayClient {
    async fn charge_once(
        &self,
        request: &ChargeRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.charges.push(request.clone());
        state.next_charge.take().unwrap_or_else(|| {
            Ok(GatewayResponse::approved(
                "This transaction has been approved.",
                format!("txn-{}", state.charges.len()),
                json!({"responseCode": "1"}),
            ))
        })
    }

    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.subscriptions.push(request.clone());
        state.next_subscription.take().unwrap_or_else(|| {
            Ok(GatewayResponse::approved(
                "Successful.",
                format!("sub-{}", state.subscriptions.len()),
                json!({"resultCode": "Ok"}),
            ))
        })
    }
}
