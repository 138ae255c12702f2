//! PostgreSQL persistence adapters.
//!
//! sqlx-based implementations of the repository ports. Schema:
//! `donor_addresses`, `donors`, `donation_types`, `donation_type_options`,
//! `promo_codes`, `donations`. The domain invariants are the contract;
//! column names are an implementation detail of this module.

mod catalog;
mod donation_repository;
mod donor_repository;

pub use catalog::{PostgresDonationTypeOptionRepository, PostgresPromoCodeRepository};
pub use donation_repository::PostgresDonationRepository;
pub use donor_repository::PostgresDonorRepository;
