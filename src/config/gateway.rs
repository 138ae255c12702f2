//! Payment gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway configuration (Authorize.Net)
///
/// Credentials are process-wide, injected at startup, and read-only
/// afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    /// API login id
    pub login_id: String,

    /// Transaction key
    pub transaction_key: String,

    /// Use the sandbox endpoint instead of production
    #[serde(default)]
    pub sandbox: bool,

    /// Override the endpoint URL entirely (testing)
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.login_id.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_LOGIN_ID"));
        }
        if self.transaction_key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_TRANSACTION_KEY"));
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidGatewayEndpoint);
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidGatewayTimeout);
        }
        Ok(())
    }
}
