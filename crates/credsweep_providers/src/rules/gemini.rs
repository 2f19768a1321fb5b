//! Google Gemini detection rule.
//!
//! Gemini has no registered validation probe; `ProviderKind::GoogleGemini`
//! is detection-only.

use crate::provider::ProviderKind;
use crate::rule::RuleDef;

pub(crate) static RULES: &[RuleDef] = &[RuleDef {
    id: "ai/gemini-api-key",
    provider: ProviderKind::GoogleGemini,
    name: "Google Gemini API Key",
    description: "Grants access to Gemini models through Google AI Studio.",
    regex: r"AIzaSy[a-zA-Z0-9_-]{30,}",
    capture_group: 0,
    keywords: &["AIzaSy"],
}];
