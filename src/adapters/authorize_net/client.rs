//! Authorize.Net gateway client.
//!
//! Implements `PaymentGatewayClient` against the Authorize.Net JSON API:
//! one-time captures through `createTransactionRequest` and recurring
//! subscriptions through `ARBCreateSubscriptionRequest`.
//!
//! # Security
//!
//! - Credentials handled via `secrecy::SecretString`
//! - Card numbers never logged; log lines carry transaction ids only
//!
//! # Timeouts
//!
//! Every request carries the configured timeout. A timed-out or unreachable
//! gateway resolves to a `GatewayError`, which the backend folds into a
//! failed purchase result — the workflow is never left hanging.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ports::{
    ChargeRequest, GatewayError, GatewayResponse, PaymentGatewayClient, SubscriptionRequest,
};

/// Production JSON API endpoint.
const PRODUCTION_ENDPOINT: &str = "https://api.authorize.net/xml/v1/request.json";

/// Sandbox JSON API endpoint.
const SANDBOX_ENDPOINT: &str = "https://apitest.authorize.net/xml/v1/request.json";

/// Response code the gateway uses for an approved transaction.
const RESPONSE_CODE_APPROVED: &str = "1";

/// Authorize.Net API configuration.
#[derive(Clone)]
pub struct AuthorizeNetConfig {
    /// API login id.
    login_id: SecretString,

    /// Transaction key.
    transaction_key: SecretString,

    /// Endpoint URL (production, sandbox, or a test server).
    endpoint: String,

    /// Per-request timeout in seconds.
    timeout_secs: u64,
}

impl AuthorizeNetConfig {
    /// Create a production configuration.
    pub fn new(login_id: impl Into<String>, transaction_key: impl Into<String>) -> Self {
        Self {
            login_id: SecretString::new(login_id.into()),
            transaction_key: SecretString::new(transaction_key.into()),
            endpoint: PRODUCTION_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `AUTHNET_LOGIN_ID`, `AUTHNET_TRANSACTION_KEY`, and optionally
    /// `AUTHNET_SANDBOX` (true/1 switches to the sandbox endpoint).
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let login_id = std::env::var("AUTHNET_LOGIN_ID")?;
        let transaction_key = std::env::var("AUTHNET_TRANSACTION_KEY")?;
        let sandbox = std::env::var("AUTHNET_SANDBOX")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let mut config = Self::new(login_id, transaction_key);
        if sandbox {
            config.endpoint = SANDBOX_ENDPOINT.to_string();
        }
        Ok(config)
    }

    /// Create configuration from the application's gateway config section.
    pub fn from_app_config(config: &crate::config::GatewayConfig) -> Self {
        let mut this = Self::new(config.login_id.clone(), config.transaction_key.clone());
        if config.sandbox {
            this.endpoint = SANDBOX_ENDPOINT.to_string();
        }
        if let Some(endpoint) = &config.endpoint {
            this.endpoint = endpoint.clone();
        }
        this.timeout_secs = config.timeout_secs;
        this
    }

    /// Switch to the sandbox endpoint.
    pub fn sandbox(mut self) -> Self {
        self.endpoint = SANDBOX_ENDPOINT.to_string();
        self
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn merchant_authentication(&self) -> Value {
        json!({
            "name": self.login_id.expose_secret(),
            "transactionKey": self.transaction_key.expose_secret(),
        })
    }
}

impl std::fmt::Debug for AuthorizeNetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizeNetConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// Authorize.Net gateway client.
pub struct AuthorizeNetClient {
    config: AuthorizeNetConfig,
    http_client: reqwest::Client,
}

impl AuthorizeNetClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AuthorizeNetConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn post(&self, payload: Value) -> Result<Value, GatewayError> {
        let response = self
            .http_client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Network(e.to_string())
                }
            })?;

        response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    fn charge_payload(&self, request: &ChargeRequest) -> Value {
        let mut bill_to = json!({
            "firstName": request.billing.first_name,
            "lastName": request.billing.last_name,
        });
        if let Some(address) = &request.billing.address {
            bill_to["address"] = json!(address.street());
            bill_to["city"] = json!(address.city());
            bill_to["state"] = json!(address.state());
            bill_to["zip"] = json!(address.postal_code());
        }

        let mut transaction = json!({
            "transactionType": "authCaptureTransaction",
            "amount": request.amount.to_string(),
            "payment": {
                "creditCard": {
                    "cardNumber": request.card.number(),
                    "expirationDate": request.card.expiration().format_month_year(),
                    "cardCode": request.card.security_code(),
                }
            },
            "billTo": bill_to,
        });
        if let Some(description) = &request.description {
            transaction["order"] = json!({ "description": description });
        }

        json!({
            "createTransactionRequest": {
                "merchantAuthentication": self.config.merchant_authentication(),
                "transactionRequest": transaction,
            }
        })
    }

    fn subscription_payload(&self, request: &SubscriptionRequest) -> Value {
        json!({
            "ARBCreateSubscriptionRequest": {
                "merchantAuthentication": self.config.merchant_authentication(),
                "subscription": {
                    "name": request
                        .subscription_name
                        .clone()
                        .unwrap_or_else(|| "Recurring donation".to_string()),
                    "paymentSchedule": {
                        "interval": {
                            "length": request.interval_months.to_string(),
                            "unit": "months",
                        },
                        "startDate": request.start_date.format("%Y-%m-%d").to_string(),
                        "totalOccurrences": request.total_occurrences.to_string(),
                    },
                    "amount": request.amount.to_string(),
                    "payment": {
                        "creditCard": {
                            "cardNumber": request.card.number(),
                            "expirationDate": request.card.expiration().format_year_month(),
                        }
                    },
                    "billTo": {
                        "firstName": request.billing.first_name,
                        "lastName": request.billing.last_name,
                    },
                }
            }
        })
    }
}

#[async_trait]
impl PaymentGatewayClient for AuthorizeNetClient {
    async fn charge_once(
        &self,
        request: &ChargeRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let body = self.post(self.charge_payload(request)).await?;
        let response = interpret_charge_response(body)?;
        if response.approved {
            tracing::debug!(
                transaction_id = response.transaction_id.as_deref().unwrap_or(""),
                "charge approved"
            );
        } else {
            tracing::debug!(reason = %response.reason, "charge not approved");
        }
        Ok(response)
    }

    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<GatewayResponse, GatewayError> {
        let body = self.post(self.subscription_payload(request)).await?;
        let response = interpret_subscription_response(body)?;
        if !response.approved {
            tracing::debug!(reason = %response.reason, "subscription not created");
        }
        Ok(response)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response Interpretation
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChargeEnvelope {
    transaction_response: Option<TransactionResponse>,
    messages: ApiMessages,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionResponse {
    response_code: String,
    trans_id: Option<String>,
    #[serde(default)]
    messages: Vec<TransactionMessage>,
    #[serde(default)]
    errors: Vec<TransactionError>,
}

#[derive(Debug, Deserialize)]
struct TransactionMessage {
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionError {
    error_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMessages {
    result_code: String,
    #[serde(default)]
    message: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    text: String,
}

impl ApiMessages {
    fn first_text(&self) -> String {
        self.message
            .first()
            .map(|m| m.text.clone())
            .unwrap_or_else(|| "No response message".to_string())
    }
}

/// Interprets a `createTransactionRequest` response body.
///
/// Approved means the transaction response code is exactly `"1"`; everything
/// else — declines, errors, held-for-review — is not approved.
fn interpret_charge_response(body: Value) -> Result<GatewayResponse, GatewayError> {
    let envelope: ChargeEnvelope =
        serde_json::from_value(body.clone()).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    match envelope.transaction_response {
        Some(transaction) => {
            let approved = transaction.response_code == RESPONSE_CODE_APPROVED;
            let reason = transaction
                .messages
                .first()
                .map(|m| m.description.clone())
                .or_else(|| transaction.errors.first().map(|e| e.error_text.clone()))
                .unwrap_or_else(|| envelope.messages.first_text());

            Ok(GatewayResponse {
                approved,
                reason,
                transaction_id: transaction.trans_id.filter(|id| approved && !id.is_empty()),
                raw: body,
            })
        }
        None => Ok(GatewayResponse::declined(envelope.messages.first_text(), body)),
    }
}

/// Interprets an `ARBCreateSubscriptionRequest` response body.
fn interpret_subscription_response(body: Value) -> Result<GatewayResponse, GatewayError> {
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct SubscriptionEnvelope {
        subscription_id: Option<String>,
        messages: ApiMessages,
    }

    let envelope: SubscriptionEnvelope =
        serde_json::from_value(body.clone()).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    let approved = envelope.messages.result_code.eq_ignore_ascii_case("ok");
    Ok(GatewayResponse {
        approved,
        reason: envelope.messages.first_text(),
        transaction_id: envelope.subscription_id.filter(|_| approved),
        raw: body,
    })
}
