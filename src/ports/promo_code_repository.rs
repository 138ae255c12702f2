//! PromoCodeRepository port.

use async_trait::async_trait;

use crate::domain::donation::PromoCode;
use crate::domain::foundation::DomainError;

/// Port for promo code lookups.
///
/// Codes are unique; lookup is by the normalized (uppercase) code string.
#[async_trait]
pub trait PromoCodeRepository: Send + Sync {
    /// Looks up a promo code by its unique code string.
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, DomainError>;
}
