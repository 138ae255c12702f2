//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through the ports.

pub mod donation;

pub use donation::{
    DonationPreview, DonationSubmission, FieldErrors, SubmissionOutcome, SubmitDonationHandler,
    WorkflowConfig,
};
