//! DonorRepository port.

use async_trait::async_trait;

use crate::domain::donation::Donor;
use crate::domain::foundation::{DomainError, DonorId};

/// Port for donor persistence.
///
/// Donors are inserted before their donation so the donation's owning
/// reference is always valid.
#[async_trait]
pub trait DonorRepository: Send + Sync {
    /// Persists a new donor (addresses included).
    async fn insert(&self, donor: &Donor) -> Result<(), DomainError>;

    /// Looks up a donor by id.
    async fn find_by_id(&self, id: &DonorId) -> Result<Option<Donor>, DomainError>;
}
