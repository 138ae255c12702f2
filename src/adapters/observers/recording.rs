//! Recording purchase observer for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::donation::{CardDetails, Donation};
use crate::domain::foundation::{Amount, DonationId};
use crate::ports::{PurchaseObserver, PurchaseResult};

/// One captured notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPurchase {
    pub donation_id: DonationId,
    pub amount: Amount,
    pub card_last_four: String,
    pub recurring_attempted: bool,
}

/// Observer that records every notification for test assertions.
#[derive(Default)]
pub struct RecordingObserver {
    recorded: Arc<Mutex<Vec<RecordedPurchase>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured notifications.
    pub fn recorded(&self) -> Vec<RecordedPurchase> {
        self.recorded
            .lock()
            .expect("RecordingObserver: lock poisoned")
            .clone()
    }

    /// Number of captured notifications.
    pub fn count(&self) -> usize {
        self.recorded
            .lock()
            .expect("RecordingObserver: lock poisoned")
            .len()
    }
}

impl Clone for RecordingObserver {
    fn clone(&self) -> Self {
        Self {
            recorded: Arc::clone(&self.recorded),
        }
    }
}

#[async_trait]
impl PurchaseObserver for RecordingObserver {
    async fn purchase_completed(
        &self,
        donation: &Donation,
        card: &CardDetails,
        result: &PurchaseResult,
    ) {
        self.recorded
            .lock()
            .expect("RecordingObserver: lock poisoned")
            .push(RecordedPurchase {
                donation_id: donation.id,
                amount: donation.amount,
                card_last_four: card.last_four().to_string(),
                recurring_attempted: result.recurring.is_some(),
            });
    }
}
