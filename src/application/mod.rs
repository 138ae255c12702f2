//! Application layer - commands and handlers.
//!
//! Orchestrates domain operations and coordinates between ports. The
//! donation workflow handler is the state machine the page layer drives.

pub mod handlers;

pub use handlers::{
    DonationPreview, DonationSubmission, FieldErrors, SubmissionOutcome, SubmitDonationHandler,
    WorkflowConfig,
};
