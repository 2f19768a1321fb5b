//! Static rule definitions for credential detection.

use crate::provider::ProviderKind;

/// A single detection rule: a regex plus the capture group that holds
/// the credential value.
///
/// Definitions are plain static data. `credsweep_core` compiles them
/// into a `RuleRegistry` at startup and validates that `capture_group`
/// actually exists in the compiled regex.
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    /// Unique identifier in `"group/name"` format (e.g. `"ai/openai-api-key"`).
    pub id: &'static str,
    /// The provider whose credential this rule detects.
    pub provider: ProviderKind,
    /// Short human-readable name shown in reports.
    pub name: &'static str,
    /// What the rule detects and why it matters.
    pub description: &'static str,
    /// Regular expression source matching the credential.
    pub regex: &'static str,
    /// Which capture group holds the credential value. `0` means the
    /// whole match.
    pub capture_group: usize,
    /// Case-insensitive keywords for Aho-Corasick pre-filtering. The
    /// rule is only evaluated against content containing at least one.
    pub keywords: &'static [&'static str],
}
