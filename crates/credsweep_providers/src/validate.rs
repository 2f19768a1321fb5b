//! Live credential validation against provider APIs.

use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::USER_AGENT;
use crate::provider::ProviderKind;

/// A pinned, boxed, `Send` future used as the return type for async validation.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Upper bound on a single validation probe. A hung provider API must
/// never hang the caller.
pub const VALIDATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed `anthropic-version` header sent with Anthropic probes.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Errors that can occur during credential validation.
///
/// Network-level faults are kept distinct from HTTP-level rejections:
/// a `401` produces an `is_valid = false` [`ValidationResult`], while a
/// refused connection, TLS failure, or timeout produces
/// [`ValidationError::Network`] so callers can tell "the key is bad"
/// from "I couldn't even ask".
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The HTTP client could not be initialised.
    #[error("failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// The provider has no known low-cost validation endpoint.
    #[error("provider '{provider}' is not supported for live validation")]
    Unsupported {
        /// The provider that cannot be validated.
        provider: ProviderKind,
    },

    /// Azure validation was requested without a resource endpoint.
    #[error("validating an {provider} credential requires the resource endpoint URL")]
    MissingEndpoint {
        /// The provider that required an endpoint.
        provider: ProviderKind,
    },

    /// Connection failure, TLS failure, or timeout before an HTTP status
    /// was received.
    #[error("network error during validation: {0}")]
    Network(#[from] reqwest::Error),
}

/// The verdict from probing a provider with a credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The provider that was probed.
    pub provider: ProviderKind,
    /// Whether the provider accepted the credential (HTTP 200).
    pub is_valid: bool,
    /// HTTP status returned by the probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Human-readable summary of the outcome.
    pub message: Box<str>,
    /// ISO 8601 timestamp of when the probe was made. Results are never
    /// cached; every call re-probes.
    pub checked_at: Box<str>,
}

impl ValidationResult {
    /// Creates a result for a credential the provider accepted.
    #[must_use]
    pub fn accepted(provider: ProviderKind) -> Self {
        Self {
            provider,
            is_valid: true,
            http_status: Some(200),
            message: "key is active".into(),
            checked_at: current_timestamp(),
        }
    }

    /// Creates a result for a credential the provider rejected with `status`.
    #[must_use]
    pub fn rejected(provider: ProviderKind, status: u16) -> Self {
        Self {
            provider,
            is_valid: false,
            http_status: Some(status),
            message: "key rejected by provider".into(),
            checked_at: current_timestamp(),
        }
    }
}

fn current_timestamp() -> Box<str> {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
        .into_boxed_str()
}

/// A provider-specific probe: one authenticated, read-only GET against a
/// metadata endpoint, classified by status code.
pub trait CredentialValidator: Send + Sync {
    /// Issues the probe and classifies the response.
    ///
    /// `endpoint` is only meaningful for providers whose API is hosted
    /// per-resource (Azure); others ignore it.
    fn validate<'a>(
        &'a self,
        client: &'a reqwest::Client,
        credential: &'a str,
        endpoint: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ValidationResult, ValidationError>>;
}

/// Front door for credential validation.
///
/// Holds a single `reqwest::Client` with the 10-second timeout and
/// dispatches to the per-provider probe through [`ProviderKind::validator`].
pub struct Validator {
    client: reqwest::Client,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

impl Validator {
    /// Creates a validator with the default probe timeout.
    pub fn new() -> Result<Self, ValidationError> {
        let client = reqwest::Client::builder()
            .timeout(VALIDATION_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ValidationError::ClientInit(e.to_string()))?;
        Ok(Self { client })
    }

    /// Probes `provider` with `credential` and returns the verdict.
    ///
    /// Exactly one outbound request is made, and only for providers with
    /// a registered probe. Unsupported providers and Azure calls without
    /// an endpoint fail before any network activity.
    pub async fn check(
        &self,
        provider: ProviderKind,
        credential: &str,
        endpoint: Option<&str>,
    ) -> Result<ValidationResult, ValidationError> {
        let probe = provider
            .validator()
            .ok_or(ValidationError::Unsupported { provider })?;
        probe.validate(&self.client, credential, endpoint).await
    }
}
