//! Donation workflow handlers.

pub mod submission;
pub mod submit_donation;
pub mod validation;

pub use submission::{
    AddressFields, DonationFields, DonationSubmission, DonorFields, FieldErrors, PaymentFields,
};
pub use submit_donation::{
    DonationPreview, SubmissionOutcome, SubmitDonationHandler, WorkflowConfig,
    UNABLE_TO_PROCESS_PAYMENT,
};
pub use validation::ValidatedSubmission;
