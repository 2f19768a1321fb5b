//! OpenAI detection rule and validation probe.

use crate::provider::ProviderKind;
use crate::rule::RuleDef;
use crate::validate::{BoxFuture, CredentialValidator, ValidationError, ValidationResult};

const OPENAI_API_BASE: &str = "https://api.openai.com";

pub(crate) static RULES: &[RuleDef] = &[RuleDef {
    id: "ai/openai-api-key",
    provider: ProviderKind::OpenAi,
    name: "OpenAI API Key",
    description: "Grants billed access to OpenAI models. Catches legacy and project-scoped keys.",
    regex: r"sk-[a-zA-Z0-9-]{40,}",
    capture_group: 0,
    keywords: &["sk-"],
}];

/// Validates OpenAI keys with a read-only `GET /v1/models` probe.
#[derive(Debug)]
pub struct OpenAiValidator {
    base_url: Box<str>,
}

impl Default for OpenAiValidator {
    fn default() -> Self {
        Self {
            base_url: OPENAI_API_BASE.into(),
        }
    }
}

impl OpenAiValidator {
    /// Creates a validator probing a non-default base URL. Used to point
    /// tests at a local mock server.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl CredentialValidator for OpenAiValidator {
    fn validate<'a>(
        &'a self,
        client: &'a reqwest::Client,
        credential: &'a str,
        _endpoint: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ValidationResult, ValidationError>> {
        Box::pin(async move {
            let response = client
                .get(format!("{}/v1/models", self.base_url))
                .header("Authorization", format!("Bearer {credential}"))
                .send()
                .await?;

            let status = response.status().as_u16();
            if status == 200 {
                Ok(ValidationResult::accepted(ProviderKind::OpenAi))
            } else {
                Ok(ValidationResult::rejected(ProviderKind::OpenAi, status))
            }
        })
    }
}
