//! Donation-specific error types.

use crate::domain::foundation::{
    DomainError, DonationId, DonationTypeOptionId, DonorId, ErrorCode,
};

use super::pricing::PricingError;

/// Errors from donation operations.
///
/// Validation and gateway failures are handled as structured results long
/// before they reach this type; these variants cover lookups, state guards,
/// and the programmer-error paths that are allowed to propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationError {
    /// Donation was not found.
    NotFound(DonationId),

    /// Donor was not found.
    DonorNotFound(DonorId),

    /// Donation type option was not found.
    OptionNotFound(DonationTypeOptionId),

    /// Donation has already been processed.
    AlreadyProcessed(DonationId),

    /// A repeating donation is missing its billing schedule.
    MissingSchedule(DonationId),

    /// No amount could be resolved for the donation.
    MissingAmount,

    /// Backend or collaborator misconfiguration.
    Configuration(String),

    /// Infrastructure error (storage, transport).
    Infrastructure(String),
}

impl DonationError {
    pub fn not_found(id: DonationId) -> Self {
        DonationError::NotFound(id)
    }

    pub fn donor_not_found(id: DonorId) -> Self {
        DonationError::DonorNotFound(id)
    }

    pub fn option_not_found(id: DonationTypeOptionId) -> Self {
        DonationError::OptionNotFound(id)
    }

    pub fn already_processed(id: DonationId) -> Self {
        DonationError::AlreadyProcessed(id)
    }

    pub fn missing_schedule(id: DonationId) -> Self {
        DonationError::MissingSchedule(id)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        DonationError::Configuration(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DonationError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DonationError::NotFound(_) => ErrorCode::DonationNotFound,
            DonationError::DonorNotFound(_) => ErrorCode::DonorNotFound,
            DonationError::OptionNotFound(_) => ErrorCode::DonationTypeNotFound,
            DonationError::AlreadyProcessed(_) => ErrorCode::AlreadyProcessed,
            DonationError::MissingSchedule(_) => ErrorCode::InvalidStateTransition,
            DonationError::MissingAmount => ErrorCode::MissingAmount,
            DonationError::Configuration(_) => ErrorCode::BackendNotConfigured,
            DonationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a human-readable error message.
    pub fn message(&self) -> String {
        match self {
            DonationError::NotFound(id) => format!("Donation not found: {}", id),
            DonationError::DonorNotFound(id) => format!("Donor not found: {}", id),
            DonationError::OptionNotFound(id) => {
                format!("Donation type option not found: {}", id)
            }
            DonationError::AlreadyProcessed(id) => {
                format!("Donation {} has already been processed", id)
            }
            DonationError::MissingSchedule(id) => {
                format!("Donation {} repeats but has no billing schedule", id)
            }
            DonationError::MissingAmount => {
                "No amount given and no donation type to take one from".to_string()
            }
            DonationError::Configuration(msg) => format!("Configuration error: {}", msg),
            DonationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for DonationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DonationError {}

impl From<PricingError> for DonationError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::MissingAmount => DonationError::MissingAmount,
        }
    }
}

impl From<DomainError> for DonationError {
    fn from(err: DomainError) -> Self {
        DonationError::Infrastructure(err.to_string())
    }
}

impl From<DonationError> for DomainError {
    fn from(err: DonationError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
