//! DonationRepository port.

use async_trait::async_trait;

use crate::domain::donation::Donation;
use crate::domain::foundation::{DomainError, DonationId};

/// Port for donation persistence.
///
/// Inserts are append-only: `created_at` and `amount` never change after the
/// row exists. The only update path is the processed-flag transition, driven
/// by the payment backend's success path. Failed purchases leave their row
/// in place with `processed = false` for audit.
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Persists a new donation.
    async fn insert(&self, donation: &Donation) -> Result<(), DomainError>;

    /// Persists the processed-flag transition for an existing donation.
    async fn update(&self, donation: &Donation) -> Result<(), DomainError>;

    /// Looks up a donation by id.
    async fn find_by_id(&self, id: &DonationId) -> Result<Option<Donation>, DomainError>;
}
