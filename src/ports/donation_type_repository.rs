//! DonationTypeOptionRepository port.

use async_trait::async_trait;

use crate::domain::donation::DonationTypeOption;
use crate::domain::foundation::{DomainError, DonationTypeOptionId};

/// Port for the tier catalog.
///
/// The workflow resolves a submitted option id against this; an unknown id
/// is reported back as a field-level validation failure, not an error.
#[async_trait]
pub trait DonationTypeOptionRepository: Send + Sync {
    /// Looks up a purchasable option by id.
    async fn find_by_id(
        &self,
        id: &DonationTypeOptionId,
    ) -> Result<Option<DonationTypeOption>, DomainError>;
}
