//! Backend registry: configuration key to payment backend.
//!
//! Backend selection is a small, compile-time-checked registration table.
//! Each entry maps a configuration key to a constructor producing a type
//! that satisfies the `PaymentBackend` contract; there is no dynamic
//! class-path loading.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::domain::donation::DonationError;
use crate::ports::{DonationRepository, PaymentBackend, PaymentGatewayClient, PurchaseObserver};

use super::authorize_net::{AuthorizeNetBackend, BACKEND_KEY as AUTHORIZE_NET};

/// Collaborators every backend is built from.
pub struct BackendDependencies {
    pub gateway: Arc<dyn PaymentGatewayClient>,
    pub donations: Arc<dyn DonationRepository>,
    pub observers: Vec<Arc<dyn PurchaseObserver>>,
}

/// Constructor for one backend variant.
pub type BackendConstructor = fn(BackendDependencies) -> Arc<dyn PaymentBackend>;

/// Registration table mapping configuration keys to backend constructors.
pub struct BackendRegistry {
    entries: HashMap<&'static str, BackendConstructor>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A registry with the built-in backends registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AUTHORIZE_NET, build_authorize_net);
        registry
    }

    /// Registers a backend constructor under a configuration key.
    ///
    /// Re-registering a key replaces the previous constructor.
    pub fn register(&mut self, key: &'static str, constructor: BackendConstructor) {
        self.entries.insert(key, constructor);
    }

    /// True when a backend is registered under the key.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Builds the backend registered under the key.
    ///
    /// # Errors
    ///
    /// Returns `DonationError::Configuration` for an unregistered key — a
    /// deployment mistake, surfaced hard at wiring time.
    pub fn create(
        &self,
        key: &str,
        dependencies: BackendDependencies,
    ) -> Result<Arc<dyn PaymentBackend>, DonationError> {
        let constructor = self.entries.get(key).ok_or_else(|| {
            DonationError::configuration(format!("no payment backend registered for '{}'", key))
        })?;
        Ok(constructor(dependencies))
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn build_authorize_net(dependencies: BackendDependencies) -> Arc<dyn PaymentBackend> {
    let mut backend = AuthorizeNetBackend::new(dependencies.gateway, dependencies.donations);
    for observer in dependencies.observers {
        backend = backend.with_observer(observer);
    }
    Arc::new(backend)
}

/// Process-wide default registry.
static DEFAULT_REGISTRY: Lazy<BackendRegistry> = Lazy::new(BackendRegistry::with_defaults);

/// Returns the default registry with the built-in backends.
pub fn default_registry() -> &'static BackendRegistry {
    &DEFAULT_REGISTRY
}
