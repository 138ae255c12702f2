//! PurchaseObserver port - notification on successful purchases.
//!
//! Backends hold an explicit, injectable list of observers and notify each
//! one after a successful one-time charge. Fire-and-forget: no return value
//! is consulted, and an observer failure never affects the purchase outcome.
//! Receipt email, analytics, and similar collaborators hang off this port
//! without the backend knowing about them.

use async_trait::async_trait;

use crate::domain::donation::{CardDetails, Donation};

use super::payment_backend::PurchaseResult;

/// Port for reacting to completed purchases.
#[async_trait]
pub trait PurchaseObserver: Send + Sync {
    /// Called once per successful purchase, after the donation is marked
    /// processed and persisted.
    async fn purchase_completed(
        &self,
        donation: &Donation,
        card: &CardDetails,
        result: &PurchaseResult,
    );
}
