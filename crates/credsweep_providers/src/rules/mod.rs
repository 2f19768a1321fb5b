//! Built-in detection rules, one module per provider.

pub(crate) mod anthropic;
pub(crate) mod azure;
pub(crate) mod gemini;
pub(crate) mod openai;

pub use anthropic::AnthropicValidator;
pub use azure::AzureOpenAiValidator;
pub use openai::OpenAiValidator;

use crate::rule::RuleDef;

/// Returns every built-in rule in registration order.
///
/// The order is part of the contract: it is stable across calls, and
/// when two rules match at the same position the earlier-registered
/// rule's finding comes first. Scan results themselves are ordered by
/// match position.
#[must_use]
pub fn builtin_rules() -> Vec<&'static RuleDef> {
    openai::RULES
        .iter()
        .chain(anthropic::RULES)
        .chain(gemini::RULES)
        .chain(azure::RULES)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::provider::ProviderKind;

    #[test]
    fn builtin_rules_cover_every_provider() {
        let covered: HashSet<_> = builtin_rules().iter().map(|r| r.provider).collect();
        for kind in ProviderKind::ALL {
            assert!(covered.contains(&kind), "no rule registered for {kind}");
        }
    }

    #[test]
    fn rule_ids_are_unique() {
        let rules = builtin_rules();
        let ids: HashSet<_> = rules.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn registration_order_is_stable() {
        let first: Vec<_> = builtin_rules().iter().map(|r| r.id).collect();
        let second: Vec<_> = builtin_rules().iter().map(|r| r.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn all_regexes_compile() {
        for rule in builtin_rules() {
            let compiled = regex::Regex::new(rule.regex);
            assert!(compiled.is_ok(), "rule {} has an invalid regex", rule.id);
        }
    }

    #[test]
    fn capture_groups_exist_in_their_regexes() {
        for rule in builtin_rules() {
            let compiled = regex::Regex::new(rule.regex).unwrap();
            assert!(
                rule.capture_group < compiled.captures_len(),
                "rule {} selects capture group {} but the regex only has {}",
                rule.id,
                rule.capture_group,
                compiled.captures_len()
            );
        }
    }

    #[test]
    fn every_rule_declares_keywords() {
        for rule in builtin_rules() {
            assert!(!rule.keywords.is_empty(), "rule {} has no pre-filter keywords", rule.id);
        }
    }
}
