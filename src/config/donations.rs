//! Donation workflow configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Donation workflow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DonationsConfig {
    /// Registry key of the payment backend to use
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Insert a confirmation step between validation and charge
    #[serde(default)]
    pub require_confirmation: bool,

    /// Pre-selected state code for the address form, if any
    pub initial_state: Option<String>,
}

fn default_backend() -> String {
    "authorize_net".to_string()
}

impl Default for DonationsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            require_confirmation: false,
            initial_state: None,
        }
    }
}

impl DonationsConfig {
    /// Validate donation workflow configuration against the known backends
    pub fn validate(&self, known_backends: &[&str]) -> Result<(), ValidationError> {
        if self.backend.is_empty() {
            return Err(ValidationError::MissingRequired("DONATIONS_BACKEND"));
        }
        if !known_backends.contains(&self.backend.as_str()) {
            return Err(ValidationError::UnknownBackend(self.backend.clone()));
        }
        Ok(())
    }
}
