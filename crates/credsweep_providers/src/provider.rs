//! The closed set of providers whose credentials credsweep understands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules;
use crate::validate::CredentialValidator;

/// Error returned when parsing an unknown provider name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProviderError {
    invalid_value: Box<str>,
}

impl ParseProviderError {
    fn new(value: &str) -> Self {
        Self {
            invalid_value: value.into(),
        }
    }

    /// Returns the name that failed to parse.
    #[must_use]
    pub fn invalid_value(&self) -> &str {
        &self.invalid_value
    }
}

impl fmt::Display for ParseProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown provider '{}': expected one of 'OpenAI', 'Anthropic', 'Google Gemini', \
             'Azure OpenAI Key', 'Azure Endpoint'",
            self.invalid_value
        )
    }
}

impl std::error::Error for ParseProviderError {}

/// An LLM/cloud vendor whose credential shape is known to the scanner.
///
/// Adding a provider means adding a variant here plus its rule module
/// under [`crate::rules`] - dispatch is exhaustive, there is no string
/// fallthrough anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// OpenAI platform API keys (`sk-...`).
    #[serde(rename = "OpenAI")]
    OpenAi,
    /// Anthropic API keys (`sk-ant-api03-...`).
    #[serde(rename = "Anthropic")]
    Anthropic,
    /// Google Gemini API keys (`AIzaSy...`).
    #[serde(rename = "Google Gemini")]
    GoogleGemini,
    /// Azure OpenAI resource keys (32-char hex next to a key-like name).
    #[serde(rename = "Azure OpenAI Key")]
    AzureOpenAiKey,
    /// Azure OpenAI resource endpoints (`https://<name>.openai.azure.com`).
    #[serde(rename = "Azure Endpoint")]
    AzureEndpoint,
}

impl ProviderKind {
    /// All providers, in rule registration order.
    pub const ALL: [Self; 5] = [
        Self::OpenAi,
        Self::Anthropic,
        Self::GoogleGemini,
        Self::AzureOpenAiKey,
        Self::AzureEndpoint,
    ];

    /// Returns the human-readable display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::GoogleGemini => "Google Gemini",
            Self::AzureOpenAiKey => "Azure OpenAI Key",
            Self::AzureEndpoint => "Azure Endpoint",
        }
    }

    /// Returns the lowercase identifier used in rule IDs and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::GoogleGemini => "gemini",
            Self::AzureOpenAiKey => "azure-openai-key",
            Self::AzureEndpoint => "azure-endpoint",
        }
    }

    /// Returns the live validator for this provider, if one exists.
    ///
    /// Gemini and Azure endpoints have no low-cost authenticated probe
    /// and return `None`; asking the [`crate::Validator`] about them
    /// yields [`crate::ValidationError::Unsupported`] without touching
    /// the network.
    #[must_use]
    pub fn validator(self) -> Option<Box<dyn CredentialValidator>> {
        match self {
            Self::OpenAi => Some(Box::new(rules::openai::OpenAiValidator::default())),
            Self::Anthropic => Some(Box::new(rules::anthropic::AnthropicValidator::default())),
            Self::AzureOpenAiKey => Some(Box::new(rules::azure::AzureOpenAiValidator)),
            Self::GoogleGemini | Self::AzureEndpoint => None,
        }
    }

    /// Returns `true` if [`Self::validator`] would return a probe.
    #[must_use]
    pub fn supports_validation(self) -> bool {
        matches!(self, Self::OpenAi | Self::Anthropic | Self::AzureOpenAiKey)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "gemini" | "google gemini" | "google-gemini" => Ok(Self::GoogleGemini),
            "azure" | "azure openai" | "azure-openai-key" | "azure openai key" => Ok(Self::AzureOpenAiKey),
            "azure-endpoint" | "azure endpoint" => Ok(Self::AzureEndpoint),
            _ => Err(ParseProviderError::new(s)),
        }
    }
}
