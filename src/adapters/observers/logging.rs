//! Logging purchase observer.
//!
//! Default observer wired into production backends: one structured log line
//! per completed purchase. Card data never appears in the line beyond the
//! last four digits.

use async_trait::async_trait;

use crate::domain::donation::{CardDetails, Donation};
use crate::ports::{PurchaseObserver, PurchaseResult};

/// Observer that logs completed purchases.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PurchaseObserver for LoggingObserver {
    async fn purchase_completed(
        &self,
        donation: &Donation,
        card: &CardDetails,
        result: &PurchaseResult,
    ) {
        tracing::info!(
            donation_id = %donation.id,
            amount = %donation.amount,
            card_last_four = card.last_four(),
            transaction_id = result.response.transaction_id.as_deref().unwrap_or(""),
            recurring = result.recurring.as_ref().map(|r| r.status),
            "purchase completed"
        );
    }
}
