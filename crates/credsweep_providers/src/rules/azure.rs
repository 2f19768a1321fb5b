//! Azure OpenAI detection rules and validation probe.

use crate::provider::ProviderKind;
use crate::rule::RuleDef;
use crate::validate::{BoxFuture, CredentialValidator, ValidationError, ValidationResult};

const AZURE_API_VERSION: &str = "2024-02-01";

pub(crate) static RULES: &[RuleDef] = &[
    RuleDef {
        id: "cloud/azure-openai-key",
        provider: ProviderKind::AzureOpenAiKey,
        name: "Azure OpenAI Key",
        // Strictly 32-char hex following a key-like variable name, so
        // arbitrary hex blobs don't trigger it.
        description: "Resource key for an Azure OpenAI deployment.",
        regex: r#"(?i)(?:api[-_]key|subscription[-_]key|azure[-_]key)\s*[:=]\s*['"]([a-fA-F0-9]{32})['"]"#,
        capture_group: 1,
        keywords: &["api_key", "api-key", "subscription_key", "subscription-key", "azure_key", "azure-key"],
    },
    RuleDef {
        id: "cloud/azure-openai-endpoint",
        provider: ProviderKind::AzureEndpoint,
        name: "Azure OpenAI Endpoint",
        description: "Resource endpoint URL; pairs with a leaked key to form usable credentials.",
        regex: r"https://[a-zA-Z0-9-]+\.openai\.azure\.com/?",
        capture_group: 0,
        keywords: &[".openai.azure.com"],
    },
];

/// Validates Azure OpenAI keys against the resource's own endpoint.
///
/// Azure keys are meaningless without the resource URL they belong to,
/// so the endpoint is required; its absence fails before any network
/// call is issued.
#[derive(Debug)]
pub struct AzureOpenAiValidator;

impl CredentialValidator for AzureOpenAiValidator {
    fn validate<'a>(
        &'a self,
        client: &'a reqwest::Client,
        credential: &'a str,
        endpoint: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ValidationResult, ValidationError>> {
        Box::pin(async move {
            let endpoint = match endpoint {
                Some(e) if !e.trim().is_empty() => e,
                _ => {
                    return Err(ValidationError::MissingEndpoint {
                        provider: ProviderKind::AzureOpenAiKey,
                    });
                }
            };

            let url = format!("{}/openai/models", endpoint.trim_end_matches('/'));
            let response = client
                .get(url)
                .query(&[("api-version", AZURE_API_VERSION)])
                .header("api-key", credential)
                .send()
                .await?;

            let status = response.status().as_u16();
            if status == 200 {
                Ok(ValidationResult::accepted(ProviderKind::AzureOpenAiKey))
            } else {
                Ok(ValidationResult::rejected(ProviderKind::AzureOpenAiKey, status))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn key_rule_captures_quoted_hex_not_variable_name() {
        let re = Regex::new(RULES[0].regex).unwrap();
        let line = r#"api_key = "0123456789abcdef0123456789abcdef""#;
        let caps = re.captures(line).unwrap();
        assert_eq!(&caps[1], "0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn key_rule_is_case_insensitive_on_variable_name() {
        let re = Regex::new(RULES[0].regex).unwrap();
        let line = r#"SUBSCRIPTION_KEY: 'ABCDEF0123456789abcdef0123456789'"#;
        assert!(re.is_match(line));
    }

    #[test]
    fn key_rule_rejects_31_char_hex() {
        let re = Regex::new(RULES[0].regex).unwrap();
        let line = format!("api_key = \"{}\"", "a".repeat(31));
        assert!(!re.is_match(&line));
    }

    #[test]
    fn endpoint_rule_matches_with_and_without_trailing_slash() {
        let re = Regex::new(RULES[1].regex).unwrap();
        assert!(re.is_match("https://my-team.openai.azure.com/"));
        assert!(re.is_match("https://my-team.openai.azure.com"));
        assert!(!re.is_match("https://example.com"));
    }

    #[tokio::test]
    async fn probe_hits_models_endpoint_with_api_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/openai/models"))
            .and(query_param("api-version", AZURE_API_VERSION))
            .and(header("api-key", "deadbeef"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let result = AzureOpenAiValidator
            .validate(&client, "deadbeef", Some(&server.uri()))
            .await
            .unwrap();

        assert!(result.is_valid);
    }

    #[tokio::test]
    async fn trailing_slash_on_endpoint_is_normalised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/openai/models"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let endpoint = format!("{}/", server.uri());
        let result = AzureOpenAiValidator
            .validate(&client, "deadbeef", Some(&endpoint))
            .await
            .unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.http_status, Some(401));
    }

    #[tokio::test]
    async fn missing_endpoint_fails_before_any_network_call() {
        let server = MockServer::start().await;
        let client = reqwest::Client::new();

        let err = AzureOpenAiValidator
            .validate(&client, "deadbeef", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingEndpoint { .. }));

        let err = AzureOpenAiValidator
            .validate(&client, "deadbeef", Some("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingEndpoint { .. }));

        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
