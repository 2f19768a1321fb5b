//! Compiled detection rules and the keyword-indexed registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use aho_corasick::AhoCorasick;
use credsweep_providers::{ProviderKind, RuleDef, builtin_rules};
use regex::Regex;

use crate::error::RuleError;

/// A detection rule compiled and ready for scanning.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier in `"group/name"` format.
    pub id: Arc<str>,
    /// The provider whose credential this rule detects.
    pub provider: ProviderKind,
    /// Short human-readable name shown in reports.
    pub name: Box<str>,
    /// Longer description of what the rule detects.
    pub description: Box<str>,
    /// Compiled regular expression.
    pub regex: Regex,
    /// Which capture group holds the credential value (0 = whole match).
    pub capture_group: usize,
    /// Case-insensitive keywords for Aho-Corasick pre-filtering. If
    /// non-empty, the rule is only evaluated against content containing
    /// at least one keyword.
    pub keywords: Box<[Box<str>]>,
}

impl Rule {
    fn from_def(def: &RuleDef) -> Result<Self, RuleError> {
        let regex = Regex::new(def.regex).map_err(|source| RuleError::InvalidRegex {
            id: def.id.to_string(),
            source,
        })?;

        if def.capture_group >= regex.captures_len() {
            return Err(RuleError::MissingCaptureGroup {
                id: def.id.to_string(),
                group: def.capture_group,
                available: regex.captures_len(),
            });
        }

        Ok(Self {
            id: Arc::from(def.id),
            provider: def.provider,
            name: def.name.into(),
            description: def.description.into(),
            regex,
            capture_group: def.capture_group,
            keywords: def.keywords.iter().map(|&k| k.into()).collect(),
        })
    }
}

/// Indexed collection of [`Rule`]s with Aho-Corasick pre-filtering.
///
/// Constructed once at startup and never mutated afterwards: the
/// registry is the only process-wide state, and it is immutable, so
/// concurrent scans share it freely. Iteration order is registration
/// order and is stable across calls.
pub struct RuleRegistry {
    rules: Vec<Rule>,
    keyword_automaton: Option<AhoCorasick>,
    keyword_to_rules: Vec<Vec<usize>>,
    rules_without_keywords: Vec<usize>,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

impl RuleRegistry {
    /// Creates a registry containing all built-in rules.
    pub fn builtin() -> Result<Self, RuleError> {
        let rules = builtin_rules()
            .into_iter()
            .map(Rule::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// Creates a registry from compiled rules, building the keyword index.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        let index = build_keyword_index(&rules);
        let keyword_automaton = build_automaton(&index.keywords);

        Self {
            rules,
            keyword_automaton,
            keyword_to_rules: index.keyword_to_rules,
            rules_without_keywords: index.rules_without_keywords,
        }
    }

    /// Returns all rules as a slice, in registration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up a rule by its ID string (e.g. `"ai/openai-api-key"`).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id.as_ref() == id)
    }

    /// Returns an iterator over the rules belonging to `provider`.
    pub fn rules_for(&self, provider: ProviderKind) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.provider == provider)
    }

    /// Looks up a rule by its positional index in the registry.
    #[must_use]
    pub fn get_by_index(&self, idx: usize) -> Option<&Rule> {
        self.rules.get(idx)
    }

    /// Returns the total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the registry contains no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn keyword_automaton(&self) -> Option<&AhoCorasick> {
        self.keyword_automaton.as_ref()
    }

    pub(crate) fn keyword_to_rules(&self) -> &[Vec<usize>] {
        &self.keyword_to_rules
    }

    pub(crate) fn rules_without_keywords(&self) -> &[usize] {
        &self.rules_without_keywords
    }
}

struct KeywordIndex {
    keywords: Vec<String>,
    keyword_to_rules: Vec<Vec<usize>>,
    rules_without_keywords: Vec<usize>,
}

fn build_keyword_index(rules: &[Rule]) -> KeywordIndex {
    let mut keywords = Vec::new();
    let mut keyword_to_rules: Vec<Vec<usize>> = Vec::new();
    let mut rules_without_keywords = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (rule_idx, rule) in rules.iter().enumerate() {
        if rule.keywords.is_empty() {
            rules_without_keywords.push(rule_idx);
            continue;
        }

        for keyword in &rule.keywords {
            if let Some(&existing) = positions.get(keyword.as_ref()) {
                keyword_to_rules[existing].push(rule_idx);
            } else {
                positions.insert(keyword.as_ref(), keywords.len());
                keywords.push(keyword.to_string());
                keyword_to_rules.push(vec![rule_idx]);
            }
        }
    }

    KeywordIndex {
        keywords,
        keyword_to_rules,
        rules_without_keywords,
    }
}

fn build_automaton(keywords: &[String]) -> Option<AhoCorasick> {
    if keywords.is_empty() {
        return None;
    }

    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(aho_corasick::MatchKind::LeftmostLongest)
        .build(keywords)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_rule;

    #[test]
    fn builtin_compiles_all_five_provider_rules() {
        let registry = RuleRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn builtin_rules_keep_registration_order() {
        let registry = RuleRegistry::builtin().unwrap();
        let ids: Vec<_> = registry.rules().iter().map(|r| r.id.as_ref()).collect();
        assert_eq!(
            ids,
            [
                "ai/openai-api-key",
                "ai/anthropic-api-key",
                "ai/gemini-api-key",
                "cloud/azure-openai-key",
                "cloud/azure-openai-endpoint",
            ]
        );
    }

    #[test]
    fn get_finds_rule_by_exact_id() {
        let registry = RuleRegistry::builtin().unwrap();
        let rule = registry.get("cloud/azure-openai-key").unwrap();
        assert_eq!(rule.capture_group, 1);
        assert_eq!(rule.provider, ProviderKind::AzureOpenAiKey);
    }

    #[test]
    fn get_returns_none_for_unknown_id() {
        let registry = RuleRegistry::builtin().unwrap();
        assert!(registry.get("nonexistent/rule").is_none());
    }

    #[test]
    fn rules_for_filters_by_provider() {
        let registry = RuleRegistry::builtin().unwrap();
        let openai: Vec<_> = registry.rules_for(ProviderKind::OpenAi).collect();
        assert_eq!(openai.len(), 1);
        assert_eq!(openai[0].id.as_ref(), "ai/openai-api-key");
    }

    #[test]
    fn invalid_capture_group_is_rejected_at_construction() {
        let def = RuleDef {
            id: "test/bad-group",
            provider: ProviderKind::OpenAi,
            name: "Bad",
            description: "selects a group the regex lacks",
            regex: r"sk-[a-z]+",
            capture_group: 3,
            keywords: &[],
        };

        let err = Rule::from_def(&def).unwrap_err();
        assert!(matches!(err, RuleError::MissingCaptureGroup { group: 3, .. }));
    }

    #[test]
    fn invalid_regex_is_rejected_at_construction() {
        let def = RuleDef {
            id: "test/bad-regex",
            provider: ProviderKind::OpenAi,
            name: "Bad",
            description: "unbalanced bracket",
            regex: r"sk-[",
            capture_group: 0,
            keywords: &[],
        };

        let err = Rule::from_def(&def).unwrap_err();
        assert!(matches!(err, RuleError::InvalidRegex { .. }));
    }

    #[test]
    fn registry_builds_automaton_when_rules_have_keywords() {
        let registry = RuleRegistry::builtin().unwrap();
        assert!(registry.keyword_automaton().is_some());
        assert!(registry.rules_without_keywords().is_empty());
    }

    #[test]
    fn keywordless_rules_are_tracked_separately() {
        let registry = RuleRegistry::new(vec![make_rule("test/no-kw", r"TOKEN_[A-Z]{8}", &[])]);
        assert!(registry.keyword_automaton().is_none());
        assert_eq!(registry.rules_without_keywords(), &[0]);
    }

    #[test]
    fn shared_keywords_map_to_multiple_rules() {
        let registry = RuleRegistry::new(vec![
            make_rule("test/a", r"TOKEN_[A-Z]{8}", &["tok_"]),
            make_rule("test/b", r"TOKEN_[0-9]{8}", &["tok_"]),
        ]);

        let mapping = registry.keyword_to_rules();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping[0], vec![0, 1]);
    }

    #[test]
    fn debug_impl_shows_rule_count() {
        let registry = RuleRegistry::builtin().unwrap();
        let debug = format!("{registry:?}");
        assert!(debug.contains("RuleRegistry"));
    }
}
