//! In-memory adapters for tests and local development.

mod catalog;
mod donations;
mod donors;

pub use catalog::{InMemoryDonationTypeOptionRepository, InMemoryPromoCodeRepository};
pub use donations::InMemoryDonationRepository;
pub use donors::InMemoryDonorRepository;
