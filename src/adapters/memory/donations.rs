//! In-memory donation repository for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::donation::Donation;
use crate::domain::foundation::{DomainError, DonationId, ErrorCode};
use crate::ports::DonationRepository;

/// In-memory implementation of `DonationRepository`.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Acceptable for test
/// code; production deployments use the PostgreSQL adapter.
#[derive(Default)]
pub struct InMemoryDonationRepository {
    donations: RwLock<HashMap<DonationId, Donation>>,
}

impl InMemoryDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous lookup (for test assertions).
    pub fn get(&self, id: &DonationId) -> Option<Donation> {
        self.donations
            .read()
            .expect("InMemoryDonationRepository: lock poisoned")
            .get(id)
            .cloned()
    }

    /// All stored donations (for test assertions).
    pub fn all(&self) -> Vec<Donation> {
        self.donations
            .read()
            .expect("InMemoryDonationRepository: lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    /// Number of stored donations.
    pub fn len(&self) -> usize {
        self.donations
            .read()
            .expect("InMemoryDonationRepository: lock poisoned")
            .len()
    }

    /// True when no donations are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DonationRepository for InMemoryDonationRepository {
    async fn insert(&self, donation: &Donation) -> Result<(), DomainError> {
        let mut donations = self
            .donations
            .write()
            .expect("InMemoryDonationRepository: lock poisoned");
        if donations.contains_key(&donation.id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Donation {} already exists", donation.id),
            ));
        }
        donations.insert(donation.id, donation.clone());
        Ok(())
    }

    async fn update(&self, donation: &Donation) -> Result<(), DomainError> {
        let mut donations = self
            .donations
            .write()
            .expect("InMemoryDonationRepository: lock poisoned");
        match donations.get_mut(&donation.id) {
            Some(stored) => {
                *stored = donation.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::DonationNotFound,
                format!("Donation {} not found", donation.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &DonationId) -> Result<Option<Donation>, DomainError> {
        Ok(self
            .donations
            .read()
            .expect("InMemoryDonationRepository: lock poisoned")
            .get(id)
            .cloned())
    }
}
