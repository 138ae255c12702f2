//! SubmitDonationHandler - the donation workflow state machine.
//!
//! One submission runs, in order: composite validation, the optional
//! confirmation gate, persistence (donor first, then donation), and the
//! backend purchase. The outcome enum is the contract with the page layer:
//! which view to render and with what context.
//!
//! Failure semantics: validation failures are locally recoverable and touch
//! nothing; a failed purchase keeps the donation row (unprocessed) for audit
//! and redisplays the form with the gateway's reason. Only a successful
//! one-time charge is terminal.

use std::sync::Arc;

use crate::domain::donation::{Donation, DonationError, PromoCode};
use crate::domain::foundation::{Amount, Timestamp};
use crate::ports::{
    DonationRepository, DonationTypeOptionRepository, DonorRepository, GatewayResponse,
    PaymentBackend, PromoCodeRepository, PurchaseResult,
};

use super::submission::{DonationSubmission, FieldErrors};
use super::validation::{self, ValidatedSubmission};

/// Error message shown with every failed purchase.
pub const UNABLE_TO_PROCESS_PAYMENT: &str = "Unable to process payment";

/// Workflow configuration.
#[derive(Debug, Clone, Default)]
pub struct WorkflowConfig {
    /// Insert a read-only confirmation step between validation and charge.
    pub require_confirmation: bool,
}

impl From<&crate::config::DonationsConfig> for WorkflowConfig {
    fn from(config: &crate::config::DonationsConfig) -> Self {
        Self {
            require_confirmation: config.require_confirmation,
        }
    }
}

/// Read-only preview shown on the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationPreview {
    pub amount: Amount,
    pub is_repeating: bool,
    /// Additional billing cycles; zero for one-time donations.
    pub repeat_count: u32,
}

/// What the page layer should do with a processed submission.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// Redisplay the form with field-level errors. Nothing was persisted and
    /// no backend call was made; the echoed submission is scrubbed.
    ValidationFailed {
        errors: FieldErrors,
        submission: DonationSubmission,
    },

    /// Render the confirmation view with the computed amount. Repeatable and
    /// side-effect free.
    ConfirmationRequired(DonationPreview),

    /// Redirect to the thanks destination.
    Completed {
        donation: Donation,
        result: PurchaseResult,
    },

    /// Redisplay the original form with the gateway's explanation. The
    /// donation row is retained with `processed = false`.
    PurchaseFailed {
        donation: Donation,
        error_msg: &'static str,
        reason: String,
        response: GatewayResponse,
        submission: DonationSubmission,
    },
}

/// Handler orchestrating the donation workflow.
pub struct SubmitDonationHandler {
    donors: Arc<dyn DonorRepository>,
    donations: Arc<dyn DonationRepository>,
    options: Arc<dyn DonationTypeOptionRepository>,
    promo_codes: Arc<dyn PromoCodeRepository>,
    backend: Arc<dyn PaymentBackend>,
    config: WorkflowConfig,
}

impl SubmitDonationHandler {
    pub fn new(
        donors: Arc<dyn DonorRepository>,
        donations: Arc<dyn DonationRepository>,
        options: Arc<dyn DonationTypeOptionRepository>,
        promo_codes: Arc<dyn PromoCodeRepository>,
        backend: Arc<dyn PaymentBackend>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            donors,
            donations,
            options,
            promo_codes,
            backend,
            config,
        }
    }

    /// Runs one submission through the workflow.
    ///
    /// # Errors
    ///
    /// Only infrastructure and programmer errors; every user-recoverable
    /// failure comes back as a [`SubmissionOutcome`].
    pub async fn handle(
        &self,
        submission: DonationSubmission,
    ) -> Result<SubmissionOutcome, DonationError> {
        // 1. Resolve catalog references; misses become field errors.
        let mut errors = FieldErrors::new();

        let option = match submission.donation.donation_type_option {
            Some(id) => match self.options.find_by_id(&id).await? {
                Some(option) => Some(option),
                None => {
                    errors.add("donation_type_option", "Unknown donation type");
                    None
                }
            },
            None => None,
        };

        let promo = self
            .resolve_promo(&submission.donation.promo_code, &mut errors)
            .await?;

        // 2. Composite validation over every section.
        let validated = match validation::validate(
            &submission,
            &self.backend.form_contract(),
            option,
            promo,
            errors,
            &Timestamp::now(),
        ) {
            Ok(validated) => validated,
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "donation submission failed validation");
                return Ok(SubmissionOutcome::ValidationFailed {
                    errors,
                    submission: submission.scrubbed(),
                });
            }
        };

        // 3. Confirmation gate: a read-only preview, no side effects.
        if self.config.require_confirmation && !submission.confirmed {
            return Ok(SubmissionOutcome::ConfirmationRequired(preview(&validated)));
        }

        // 4. Persist donor first so the donation's owning reference is valid.
        self.donors.insert(&validated.donor).await?;

        let mut donation = Donation::create(
            validated.donor.id,
            validated.explicit_amount,
            validated.option.clone(),
            validated.promo.clone(),
            validated.attribution.clone(),
            validated.anonymous,
        )?;
        self.donations.insert(&donation).await?;

        // 5. Charge through the configured backend.
        let result = self
            .backend
            .purchase(&mut donation, &validated.donor, &validated.card)
            .await?;

        if result.status {
            tracing::info!(
                donation_id = %donation.id,
                amount = %donation.amount,
                repeating = donation.is_repeating(),
                "donation purchase completed"
            );
            Ok(SubmissionOutcome::Completed { donation, result })
        } else {
            tracing::warn!(
                donation_id = %donation.id,
                reason = %result.reason,
                "donation purchase failed"
            );
            Ok(SubmissionOutcome::PurchaseFailed {
                donation,
                error_msg: UNABLE_TO_PROCESS_PAYMENT,
                reason: result.reason.clone(),
                response: result.response,
                submission: submission.scrubbed(),
            })
        }
    }

    async fn resolve_promo(
        &self,
        raw_code: &str,
        errors: &mut FieldErrors,
    ) -> Result<Option<PromoCode>, DonationError> {
        let code = raw_code.trim().to_uppercase();
        if code.is_empty() {
            return Ok(None);
        }
        match self.promo_codes.find_by_code(&code).await? {
            Some(promo) => Ok(Some(promo)),
            None => {
                errors.add("promo_code", "Unknown promo code");
                Ok(None)
            }
        }
    }
}

fn preview(validated: &ValidatedSubmission) -> DonationPreview {
    let repeat_count = validated
        .option
        .as_ref()
        .map(|option| option.repeat_count)
        .unwrap_or(0);
    DonationPreview {
        amount: validated.resolved_amount(),
        is_repeating: repeat_count > 0,
        repeat_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::donation::submission::{
        DonationFields, DonorFields, PaymentFields,
    };
    use crate::domain::donation::{CardDetails, DonationTypeOption, Donor};
    use crate::domain::foundation::{
        DiscountPercent, DomainError, DonationId, DonationTypeId, DonationTypeOptionId, DonorId,
    };
    use crate::ports::FormContract;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct MockDonorRepository {
        inserted: Mutex<Vec<Donor>>,
    }

    #[async_trait]
    impl DonorRepository for MockDonorRepository {
        async fn insert(&self, donor: &Donor) -> Result<(), DomainError> {
            self.inserted.lock().unwrap().push(donor.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &DonorId) -> Result<Option<Donor>, DomainError> {
            Ok(self
                .inserted
                .lock()
                .unwrap()
                .iter()
                .find(|donor| donor.id == *id)
                .cloned())
        }
    }

    #[derive(Default)]
    struct MockDonationRepository {
        inserted: Mutex<Vec<Donation>>,
        updated: Mutex<Vec<Donation>>,
    }

    #[async_trait]
    impl DonationRepository for MockDonationRepository {
        async fn insert(&self, donation: &Donation) -> Result<(), DomainError> {
            self.inserted.lock().unwrap().push(donation.clone());
            Ok(())
        }

        async fn update(&self, donation: &Donation) -> Result<(), DomainError> {
            self.updated.lock().unwrap().push(donation.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &DonationId) -> Result<Option<Donation>, DomainError> {
            Ok(self
                .inserted
                .lock()
                .unwrap()
                .iter()
                .find(|donation| donation.id == *id)
                .cloned())
        }
    }

    #[derive(Default)]
    struct MockOptionRepository {
        options: Vec<DonationTypeOption>,
    }

    #[async_trait]
    impl DonationTypeOptionRepository for MockOptionRepository {
        async fn find_by_id(
            &self,
            id: &DonationTypeOptionId,
        ) -> Result<Option<DonationTypeOption>, DomainError> {
            Ok(self.options.iter().find(|option| option.id == *id).cloned())
        }
    }

    #[derive(Default)]
    struct MockPromoRepository {
        promos: Vec<PromoCode>,
    }

    #[async_trait]
    impl PromoCodeRepository for MockPromoRepository {
        async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, DomainError> {
            Ok(self.promos.iter().find(|promo| promo.code() == code).cloned())
        }
    }

    /// Backend stub: records charge amounts and answers with a canned result.
    struct StubBackend {
        approve: bool,
        reason: String,
        charged_amounts: Mutex<Vec<Amount>>,
    }

    impl StubBackend {
        fn approving() -> Self {
            Self {
                approve: true,
                reason: "This transaction has been approved.".to_string(),
                charged_amounts: Mutex::new(Vec::new()),
            }
        }

        fn declining(reason: &str) -> Self {
            Self {
                approve: false,
                reason: reason.to_string(),
                charged_amounts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PaymentBackend for StubBackend {
        fn form_contract(&self) -> FormContract {
            FormContract::card_payment()
        }

        async fn purchase(
            &self,
            donation: &mut Donation,
            _donor: &Donor,
            _card: &CardDetails,
        ) -> Result<PurchaseResult, DonationError> {
            self.charged_amounts.lock().unwrap().push(donation.amount);
            if self.approve {
                donation.mark_processed()?;
                Ok(PurchaseResult::succeeded(GatewayResponse::approved(
                    self.reason.clone(),
                    "txn-1",
                    serde_json::json!({"responseCode": "1"}),
                )))
            } else {
                Ok(PurchaseResult::failed(
                    self.reason.clone(),
                    GatewayResponse::declined(
                        self.reason.clone(),
                        serde_json::json!({"responseCode": "2"}),
                    ),
                ))
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    struct Harness {
        donors: Arc<MockDonorRepository>,
        donations: Arc<MockDonationRepository>,
        backend: Arc<StubBackend>,
        handler: SubmitDonationHandler,
    }

    fn harness(backend: StubBackend, config: WorkflowConfig) -> Harness {
        harness_with_catalog(backend, config, Vec::new(), Vec::new())
    }

    fn harness_with_catalog(
        backend: StubBackend,
        config: WorkflowConfig,
        options: Vec<DonationTypeOption>,
        promos: Vec<PromoCode>,
    ) -> Harness {
        let donors = Arc::new(MockDonorRepository::default());
        let donations = Arc::new(MockDonationRepository::default());
        let backend = Arc::new(backend);
        let handler = SubmitDonationHandler::new(
            donors.clone(),
            donations.clone(),
            Arc::new(MockOptionRepository { options }),
            Arc::new(MockPromoRepository { promos }),
            backend.clone(),
            config,
        );
        Harness {
            donors,
            donations,
            backend,
            handler,
        }
    }

    fn submission(amount: &str) -> DonationSubmission {
        DonationSubmission {
            donor: DonorFields {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                phone: String::new(),
            },
            donation: DonationFields {
                amount: amount.to_string(),
                ..Default::default()
            },
            payment: PaymentFields {
                card_number: "4111111111111111".to_string(),
                security_code: "123".to_string(),
                expiration_month: "12".to_string(),
                expiration_year: "2030".to_string(),
            },
            ..Default::default()
        }
    }

    fn monthly_option(dollars: u32, repeat_count: u32) -> DonationTypeOption {
        DonationTypeOption::try_new(
            DonationTypeId::new(),
            Amount::from_dollars(dollars),
            1,
            repeat_count,
        )
        .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Path
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_submission_completes_and_persists() {
        let h = harness(StubBackend::approving(), WorkflowConfig::default());

        let outcome = h.handler.handle(submission("50")).await.unwrap();

        match outcome {
            SubmissionOutcome::Completed { donation, result } => {
                assert!(result.status);
                assert!(donation.is_processed());
                assert_eq!(donation.amount, Amount::from_dollars(50));
            }
            other => panic!("expected Completed, got {:?}", other),
        }
        assert_eq!(h.donors.inserted.lock().unwrap().len(), 1);
        assert_eq!(h.donations.inserted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn charge_uses_the_resolved_amount() {
        let h = harness(StubBackend::approving(), WorkflowConfig::default());
        h.handler.handle(submission("50")).await.unwrap();

        let amounts = h.backend.charged_amounts.lock().unwrap();
        assert_eq!(amounts.as_slice(), &[Amount::from_dollars(50)]);
    }

    #[tokio::test]
    async fn promo_code_discounts_the_charge() {
        let promo =
            PromoCode::try_new("QUARTER", DiscountPercent::from_whole(25).unwrap()).unwrap();
        let h = harness_with_catalog(
            StubBackend::approving(),
            WorkflowConfig::default(),
            Vec::new(),
            vec![promo],
        );

        let mut sub = submission("100");
        sub.donation.promo_code = "quarter".to_string();
        let outcome = h.handler.handle(sub).await.unwrap();

        match outcome {
            SubmissionOutcome::Completed { donation, .. } => {
                assert_eq!(donation.amount, Amount::from_dollars(75));
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn catalog_option_supplies_the_amount() {
        let option = monthly_option(100, 0);
        let option_id = option.id;
        let h = harness_with_catalog(
            StubBackend::approving(),
            WorkflowConfig::default(),
            vec![option],
            Vec::new(),
        );

        let mut sub = submission("");
        sub.donation.donation_type_option = Some(option_id);
        let outcome = h.handler.handle(sub).await.unwrap();

        match outcome {
            SubmissionOutcome::Completed { donation, .. } => {
                assert_eq!(donation.amount, Amount::from_dollars(100));
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Validation Failures
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn validation_failure_persists_nothing_and_scrubs() {
        let h = harness(StubBackend::approving(), WorkflowConfig::default());

        let mut sub = submission("50");
        sub.donor.first_name = String::new();
        let outcome = h.handler.handle(sub).await.unwrap();

        match outcome {
            SubmissionOutcome::ValidationFailed { errors, submission } => {
                assert!(errors.has("first_name"));
                assert!(submission.payment.card_number.is_empty());
                assert!(submission.payment.security_code.is_empty());
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
        assert!(h.donors.inserted.lock().unwrap().is_empty());
        assert!(h.donations.inserted.lock().unwrap().is_empty());
        assert!(h.backend.charged_amounts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_promo_code_is_a_field_error() {
        let h = harness(StubBackend::approving(), WorkflowConfig::default());

        let mut sub = submission("50");
        sub.donation.promo_code = "NOSUCH".to_string();
        let outcome = h.handler.handle(sub).await.unwrap();

        match outcome {
            SubmissionOutcome::ValidationFailed { errors, .. } => {
                assert!(errors.has("promo_code"));
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_donation_type_is_a_field_error() {
        let h = harness(StubBackend::approving(), WorkflowConfig::default());

        let mut sub = submission("");
        sub.donation.donation_type_option = Some(DonationTypeOptionId::new());
        let outcome = h.handler.handle(sub).await.unwrap();

        match outcome {
            SubmissionOutcome::ValidationFailed { errors, .. } => {
                assert!(errors.has("donation_type_option"));
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Confirmation Step
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn confirmation_required_before_charging() {
        let h = harness(
            StubBackend::approving(),
            WorkflowConfig {
                require_confirmation: true,
            },
        );

        let outcome = h.handler.handle(submission("50")).await.unwrap();

        match outcome {
            SubmissionOutcome::ConfirmationRequired(preview) => {
                assert_eq!(preview.amount, Amount::from_dollars(50));
                assert!(!preview.is_repeating);
            }
            other => panic!("expected ConfirmationRequired, got {:?}", other),
        }
        // Read-only: nothing persisted, nothing charged.
        assert!(h.donors.inserted.lock().unwrap().is_empty());
        assert!(h.donations.inserted.lock().unwrap().is_empty());
        assert!(h.backend.charged_amounts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirmation_preview_is_idempotent() {
        let h = harness(
            StubBackend::approving(),
            WorkflowConfig {
                require_confirmation: true,
            },
        );

        for _ in 0..3 {
            let outcome = h.handler.handle(submission("50")).await.unwrap();
            assert!(matches!(outcome, SubmissionOutcome::ConfirmationRequired(_)));
        }
        assert!(h.donations.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirmed_submission_proceeds_to_charge() {
        let h = harness(
            StubBackend::approving(),
            WorkflowConfig {
                require_confirmation: true,
            },
        );

        let mut sub = submission("50");
        sub.confirmed = true;
        let outcome = h.handler.handle(sub).await.unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn preview_shows_discounted_amount_and_schedule() {
        let option = monthly_option(100, 12);
        let option_id = option.id;
        let promo = PromoCode::try_new("HALF", DiscountPercent::from_whole(50).unwrap()).unwrap();
        let h = harness_with_catalog(
            StubBackend::approving(),
            WorkflowConfig {
                require_confirmation: true,
            },
            vec![option],
            vec![promo],
        );

        let mut sub = submission("");
        sub.donation.donation_type_option = Some(option_id);
        sub.donation.promo_code = "HALF".to_string();
        let outcome = h.handler.handle(sub).await.unwrap();

        match outcome {
            SubmissionOutcome::ConfirmationRequired(preview) => {
                assert_eq!(preview.amount, Amount::from_dollars(50));
                assert!(preview.is_repeating);
                assert_eq!(preview.repeat_count, 12);
            }
            other => panic!("expected ConfirmationRequired, got {:?}", other),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Purchase Failures
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn declined_charge_redisplays_with_reason_and_keeps_row() {
        let h = harness(
            StubBackend::declining("This transaction has been declined."),
            WorkflowConfig::default(),
        );

        let outcome = h.handler.handle(submission("50")).await.unwrap();

        match outcome {
            SubmissionOutcome::PurchaseFailed {
                donation,
                error_msg,
                reason,
                submission,
                ..
            } => {
                assert_eq!(error_msg, UNABLE_TO_PROCESS_PAYMENT);
                assert_eq!(reason, "This transaction has been declined.");
                assert!(!donation.is_processed());
                assert!(submission.payment.card_number.is_empty());
            }
            other => panic!("expected PurchaseFailed, got {:?}", other),
        }
        // The attempted donation row is retained for audit.
        assert_eq!(h.donations.inserted.lock().unwrap().len(), 1);
        assert!(!h.donations.inserted.lock().unwrap()[0].is_processed());
    }
}
