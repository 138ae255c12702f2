//! Authorize.Net payment backend.
//!
//! Orchestrates the two-phase charge sequence over the gateway client:
//! the one-time capture always runs first; a recurring subscription is
//! established only after a successful capture and only for repeating
//! donations. Gateway status interpretation stays in the client — this
//! backend only sequences calls and owns the processed-flag side effect.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::donation::{CardDetails, Donation, DonationError, DonationTypeOption, Donor};
use crate::domain::foundation::Timestamp;
use crate::ports::{
    BillingInfo, ChargeRequest, DonationRepository, FormContract, GatewayResponse,
    PaymentBackend, PaymentGatewayClient, PurchaseObserver, PurchaseResult, RecurringResult,
    SubscriptionRequest,
};

/// Configuration key under which this backend registers.
pub const BACKEND_KEY: &str = "authorize_net";

/// Payment backend for an Authorize.Net-style gateway.
pub struct AuthorizeNetBackend {
    gateway: Arc<dyn PaymentGatewayClient>,
    donations: Arc<dyn DonationRepository>,
    observers: Vec<Arc<dyn PurchaseObserver>>,
}

impl AuthorizeNetBackend {
    pub fn new(
        gateway: Arc<dyn PaymentGatewayClient>,
        donations: Arc<dyn DonationRepository>,
    ) -> Self {
        Self {
            gateway,
            donations,
            observers: Vec::new(),
        }
    }

    /// Adds an observer notified after each successful purchase.
    pub fn with_observer(mut self, observer: Arc<dyn PurchaseObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    fn charge_request(donation: &Donation, donor: &Donor, card: &CardDetails) -> ChargeRequest {
        ChargeRequest {
            amount: donation.amount,
            card: card.clone(),
            billing: Self::billing_info(donor),
            description: (!donation.attribution.is_empty())
                .then(|| format!("Donation ({})", donation.attribution)),
        }
    }

    fn subscription_request(
        donation: &Donation,
        donor: &Donor,
        card: &CardDetails,
        option: &DonationTypeOption,
    ) -> SubscriptionRequest {
        // First scheduled charge lands one billing cycle after today; the
        // cycle just captured covers the first interval.
        let start_date = Timestamp::now().add_days(option.cycle_days()).date();
        SubscriptionRequest {
            amount: donation.amount,
            card: card.clone(),
            billing: Self::billing_info(donor),
            interval_months: option.months_per_installment,
            total_occurrences: option.repeat_count,
            start_date,
            subscription_name: Some(format!("Recurring donation from {}", donor.full_name())),
        }
    }

    fn billing_info(donor: &Donor) -> BillingInfo {
        BillingInfo {
            first_name: donor.first_name.clone(),
            last_name: donor.last_name.clone(),
            address: donor.billing_address.clone(),
        }
    }
}

#[async_trait]
impl PaymentBackend for AuthorizeNetBackend {
    fn form_contract(&self) -> FormContract {
        FormContract::card_payment()
    }

    async fn purchase(
        &self,
        donation: &mut Donation,
        donor: &Donor,
        card: &CardDetails,
    ) -> Result<PurchaseResult, DonationError> {
        // 1. One-time capture, always first. Transport failures fold into a
        //    failed result; they never propagate as errors.
        let charge = Self::charge_request(donation, donor, card);
        let response = match self.gateway.charge_once(&charge).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(donation_id = %donation.id, error = %err, "one-time charge failed to reach the gateway");
                let reason = err.reason();
                return Ok(PurchaseResult::failed(
                    reason.clone(),
                    GatewayResponse::declined(reason, Value::Null),
                ));
            }
        };

        // 2. A failed capture ends the purchase: no subscription attempt,
        //    no processed flag, no recurring field in the result.
        if !response.approved {
            return Ok(PurchaseResult::failed(response.reason.clone(), response));
        }

        let mut result = PurchaseResult::succeeded(response);

        // 3. Establish the recurring schedule for repeating donations. Its
        //    outcome rides along in `recurring`; the captured charge is
        //    never reversed here, so top-level status stays success.
        if let Some(option) = donation
            .donation_type_option
            .as_ref()
            .filter(|option| option.is_repeating())
        {
            let request = Self::subscription_request(donation, donor, card, option);
            let recurring = match self.gateway.create_subscription(&request).await {
                Ok(response) => RecurringResult {
                    status: response.approved,
                    reason: response.reason.clone(),
                    response,
                },
                Err(err) => {
                    let reason = err.reason();
                    RecurringResult {
                        status: false,
                        reason: reason.clone(),
                        response: GatewayResponse::declined(reason, Value::Null),
                    }
                }
            };
            if !recurring.status {
                tracing::warn!(
                    donation_id = %donation.id,
                    reason = %recurring.reason,
                    "subscription setup failed after a successful capture"
                );
            }
            result = result.with_recurring(recurring);
        }

        // 4. Mark processed and persist the transition.
        donation.mark_processed()?;
        self.donations.update(donation).await?;

        // 5. Notify observers. Fire-and-forget: no return value consulted.
        for observer in &self.observers {
            observer.purchase_completed(donation, card, &result).await;
        }

        Ok(result)
    }
}
