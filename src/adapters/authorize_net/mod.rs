//! Authorize.Net gateway adapter.
//!
//! `AuthorizeNetClient` speaks the gateway's JSON API; `AuthorizeNetBackend`
//! sequences the purchase workflow on top of any `PaymentGatewayClient`.

mod backend;
mod client;

pub use backend::{AuthorizeNetBackend, BACKEND_KEY};
pub use client::{AuthorizeNetClient, AuthorizeNetConfig};
