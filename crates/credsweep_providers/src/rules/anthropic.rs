//! Anthropic detection rule and validation probe.

use crate::provider::ProviderKind;
use crate::rule::RuleDef;
use crate::validate::{ANTHROPIC_VERSION, BoxFuture, CredentialValidator, ValidationError, ValidationResult};

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";

pub(crate) static RULES: &[RuleDef] = &[RuleDef {
    id: "ai/anthropic-api-key",
    provider: ProviderKind::Anthropic,
    name: "Anthropic API Key",
    description: "Grants billed access to Claude models.",
    regex: r"sk-ant-api03-[a-zA-Z0-9_-]{50,}",
    capture_group: 0,
    keywords: &["sk-ant-api03-"],
}];

/// Validates Anthropic keys with a read-only `GET /v1/models` probe.
///
/// The fixed `anthropic-version` header is required by the API; the
/// probe sends the same pinned version on every call.
#[derive(Debug)]
pub struct AnthropicValidator {
    base_url: Box<str>,
}

impl Default for AnthropicValidator {
    fn default() -> Self {
        Self {
            base_url: ANTHROPIC_API_BASE.into(),
        }
    }
}

impl AnthropicValidator {
    /// Creates a validator probing a non-default base URL. Used to point
    /// tests at a local mock server.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl CredentialValidator for AnthropicValidator {
    fn validate<'a>(
        &'a self,
        client: &'a reqwest::Client,
        credential: &'a str,
        _endpoint: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ValidationResult, ValidationError>> {
        Box::pin(async move {
            let response = client
                .get(format!("{}/v1/models", self.base_url))
                .header("x-api-key", credential)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .send()
                .await?;

            let status = response.status().as_u16();
            if status == 200 {
                Ok(ValidationResult::accepted(ProviderKind::Anthropic))
            } else {
                Ok(ValidationResult::rejected(ProviderKind::Anthropic, status))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn rule_matches_fifty_char_suffix() {
        let re = Regex::new(RULES[0].regex).unwrap();
        let key = format!("sk-ant-api03-{}", "aB_-9".repeat(10));
        assert!(re.is_match(&key));
    }

    #[test]
    fn rule_rejects_plain_openai_key() {
        let re = Regex::new(RULES[0].regex).unwrap();
        let key = format!("sk-{}", "x".repeat(40));
        assert!(!re.is_match(&key));
    }

    #[tokio::test]
    async fn probe_sends_api_key_and_version_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let validator = AnthropicValidator::with_base_url(&server.uri());
        let client = reqwest::Client::new();

        let result = validator.validate(&client, "sk-ant-test", None).await.unwrap();

        assert!(result.is_valid);
        assert_eq!(result.provider, ProviderKind::Anthropic);
    }

    #[tokio::test]
    async fn forbidden_status_is_recorded_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let validator = AnthropicValidator::with_base_url(&server.uri());
        let client = reqwest::Client::new();

        let result = validator.validate(&client, "sk-ant-test", None).await.unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.http_status, Some(403));
    }
}
