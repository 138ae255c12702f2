//! In-memory catalog repositories: donation type options and promo codes.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::donation::{DonationTypeOption, PromoCode};
use crate::domain::foundation::{DomainError, DonationTypeOptionId};
use crate::ports::{DonationTypeOptionRepository, PromoCodeRepository};

/// In-memory implementation of `DonationTypeOptionRepository`.
///
/// Seeded up front; the workflow only reads from it.
#[derive(Default)]
pub struct InMemoryDonationTypeOptionRepository {
    options: RwLock<HashMap<DonationTypeOptionId, DonationTypeOption>>,
}

impl InMemoryDonationTypeOptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option to the catalog.
    pub fn seed(&self, option: DonationTypeOption) {
        self.options
            .write()
            .expect("InMemoryDonationTypeOptionRepository: lock poisoned")
            .insert(option.id, option);
    }
}

#[async_trait]
impl DonationTypeOptionRepository for InMemoryDonationTypeOptionRepository {
    async fn find_by_id(
        &self,
        id: &DonationTypeOptionId,
    ) -> Result<Option<DonationTypeOption>, DomainError> {
        Ok(self
            .options
            .read()
            .expect("InMemoryDonationTypeOptionRepository: lock poisoned")
            .get(id)
            .cloned())
    }
}

/// In-memory implementation of `PromoCodeRepository`.
///
/// Lookup is by the normalized (uppercase) code, matching the unique-code
/// contract of the persistent store.
#[derive(Default)]
pub struct InMemoryPromoCodeRepository {
    promos: RwLock<HashMap<String, PromoCode>>,
}

impl InMemoryPromoCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a promo code.
    pub fn seed(&self, promo: PromoCode) {
        self.promos
            .write()
            .expect("InMemoryPromoCodeRepository: lock poisoned")
            .insert(promo.code().to_string(), promo);
    }
}

#[async_trait]
impl PromoCodeRepository for InMemoryPromoCodeRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, DomainError> {
        Ok(self
            .promos
            .read()
            .expect("InMemoryPromoCodeRepository: lock poisoned")
            .get(&code.to_uppercase())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Amount, DiscountPercent, DonationTypeId};

    #[tokio::test]
    async fn seeded_option_is_found_by_id() {
        let repo = InMemoryDonationTypeOptionRepository::new();
        let option =
            DonationTypeOption::one_time(DonationTypeId::new(), Amount::from_dollars(100)).unwrap();
        let id = option.id;
        repo.seed(option);

        assert!(repo.find_by_id(&id).await.unwrap().is_some());
        assert!(repo
            .find_by_id(&DonationTypeOptionId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn promo_lookup_is_case_insensitive() {
        let repo = InMemoryPromoCodeRepository::new();
        let promo =
            PromoCode::try_new("SPRING", DiscountPercent::from_whole(25).unwrap()).unwrap();
        repo.seed(promo);

        assert!(repo.find_by_code("spring").await.unwrap().is_some());
        assert!(repo.find_by_code("SPRING").await.unwrap().is_some());
        assert!(repo.find_by_code("WINTER").await.unwrap().is_none());
    }
}
