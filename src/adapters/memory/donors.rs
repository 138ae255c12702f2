//! In-memory donor repository for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::donation::Donor;
use crate::domain::foundation::{DomainError, DonorId, ErrorCode};
use crate::ports::DonorRepository;

/// In-memory implementation of `DonorRepository`.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Acceptable for test
/// code; production deployments use the PostgreSQL adapter.
#[derive(Default)]
pub struct InMemoryDonorRepository {
    donors: RwLock<HashMap<DonorId, Donor>>,
}

impl InMemoryDonorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored donors (for test assertions).
    pub fn len(&self) -> usize {
        self.donors
            .read()
            .expect("InMemoryDonorRepository: lock poisoned")
            .len()
    }

    /// True when no donors are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DonorRepository for InMemoryDonorRepository {
    async fn insert(&self, donor: &Donor) -> Result<(), DomainError> {
        let mut donors = self
            .donors
            .write()
            .expect("InMemoryDonorRepository: lock poisoned");
        if donors.contains_key(&donor.id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Donor {} already exists", donor.id),
            ));
        }
        donors.insert(donor.id, donor.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DonorId) -> Result<Option<Donor>, DomainError> {
        Ok(self
            .donors
            .read()
            .expect("InMemoryDonorRepository: lock poisoned")
            .get(id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_find_roundtrips() {
        let repo = InMemoryDonorRepository::new();
        let donor = Donor::create("Grace", "Hopper", None).unwrap();

        repo.insert(&donor).await.unwrap();
        let found = repo.find_by_id(&donor.id).await.unwrap();

        assert_eq!(found, Some(donor));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let repo = InMemoryDonorRepository::new();
        let donor = Donor::create("Grace", "Hopper", None).unwrap();

        repo.insert(&donor).await.unwrap();
        assert!(repo.insert(&donor).await.is_err());
    }

    #[tokio::test]
    async fn unknown_id_finds_nothing() {
        let repo = InMemoryDonorRepository::new();
        assert!(repo.find_by_id(&DonorId::new()).await.unwrap().is_none());
    }
}
