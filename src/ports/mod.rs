//! Ports - interfaces between the application core and the outside world.
//!
//! Each port defines a contract that adapters implement: gateway transport,
//! persistence, and post-purchase notification. The application layer depends
//! only on these traits.

mod donation_repository;
mod donation_type_repository;
mod donor_repository;
mod payment_backend;
mod payment_gateway;
mod promo_code_repository;
mod purchase_observer;

pub use donation_repository::DonationRepository;
pub use donation_type_repository::DonationTypeOptionRepository;
pub use donor_repository::DonorRepository;
pub use payment_backend::{
    FormContract, PaymentBackend, PaymentField, PurchaseResult, RecurringResult,
};
pub use payment_gateway::{
    BillingInfo, ChargeRequest, GatewayError, GatewayResponse, PaymentGatewayClient,
    SubscriptionRequest,
};
pub use promo_code_repository::PromoCodeRepository;
pub use purchase_observer::PurchaseObserver;
