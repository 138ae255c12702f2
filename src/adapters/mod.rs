//! Adapters - implementations of the ports.
//!
//! # Module Organization
//!
//! - `authorize_net` - Gateway client and payment backend
//! - `gateway` - Gateway test doubles
//! - `memory` - In-memory repositories for tests and local development
//! - `observers` - Purchase observers (logging, recording)
//! - `postgres` - sqlx persistence adapters
//! - `registry` - Configuration-keyed backend registry

pub mod authorize_net;
pub mod gateway;
pub mod memory;
pub mod observers;
pub mod postgres;
pub mod registry;

pub use registry::{default_registry, BackendDependencies, BackendRegistry};
