//! Helpers shared by unit tests.

use std::sync::Arc;

use credsweep_providers::ProviderKind;
use regex::Regex;

use crate::rule::Rule;

/// Builds a compiled test rule with the given id, regex, and keywords.
///
/// Panics on an invalid regex; test fixtures are expected to be valid.
pub(crate) fn make_rule(id: &str, regex: &str, keywords: &[&str]) -> Rule {
    Rule {
        id: Arc::from(id),
        provider: ProviderKind::OpenAi,
        name: "Test Rule".into(),
        description: "test fixture".into(),
        regex: Regex::new(regex).unwrap(),
        capture_group: 0,
        keywords: keywords.iter().map(|&k| k.into()).collect(),
    }
}
