//! The scan engine: rules in, detections out.

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::binary::is_binary_content;
use crate::finding::{Credential, Detection, Finding, FindingId};
use crate::mask::mask;
use crate::rule::{Rule, RuleRegistry};

/// Matches every registry rule against text and produces [`Detection`]s.
///
/// Pure over its inputs: no filesystem or network access. Keyword
/// pre-filtering (Aho-Corasick) skips rules whose keywords are absent
/// from the content before any regex runs.
///
/// Two granularities exist because downstream callers differ:
/// [`Scanner::scan`] is whole-buffer and is the default used for files
/// and remote content; [`Scanner::scan_lines`] tracks 1-based line
/// numbers but cannot find a match that straddles a line boundary. The
/// two modes can report different totals and are never mixed.
pub struct Scanner {
    registry: RuleRegistry,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("rules", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl Scanner {
    /// Creates a scanner over a compiled registry.
    #[must_use]
    pub const fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry this scanner runs.
    #[must_use]
    pub const fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Scans a whole buffer. Findings carry no line number and are
    /// ordered by match position (top-to-bottom, then left-to-right).
    #[must_use]
    pub fn scan(&self, content: &str, source: &str) -> Vec<Detection> {
        if is_binary_content(content) {
            #[cfg(feature = "tracing")]
            trace!(source, "skipping binary content");
            return Vec::new();
        }

        let mut hits = Vec::new();
        for idx in self.select_rules_to_run(content) {
            let Some(rule) = self.registry.get_by_index(idx) else {
                continue;
            };
            collect_matches(rule, content, source, None, &mut hits);
        }

        hits.sort_by_key(|(offset, _)| *offset);
        hits.into_iter().map(|(_, d)| d).collect()
    }

    /// Scans line by line, setting the 1-based line number on each
    /// finding. A credential split across a line boundary is invisible
    /// to this mode; prefer [`Scanner::scan`] unless per-line locations
    /// matter.
    #[must_use]
    pub fn scan_lines(&self, content: &str, source: &str) -> Vec<Detection> {
        if is_binary_content(content) {
            return Vec::new();
        }

        let mut detections = Vec::new();
        for (line_idx, line) in content.lines().enumerate() {
            #[expect(clippy::cast_possible_truncation, reason = "files with 2^32 lines are not a real input")]
            let line_no = line_idx as u32 + 1;

            let mut hits = Vec::new();
            for idx in self.select_rules_to_run(line) {
                let Some(rule) = self.registry.get_by_index(idx) else {
                    continue;
                };
                collect_matches(rule, line, source, Some(line_no), &mut hits);
            }
            hits.sort_by_key(|(offset, _)| *offset);
            detections.extend(hits.into_iter().map(|(_, d)| d));
        }
        detections
    }

    /// Returns indices of rules worth running against `content`, in
    /// registry order.
    fn select_rules_to_run(&self, content: &str) -> Vec<usize> {
        let mut should_run = vec![false; self.registry.len()];

        for &idx in self.registry.rules_without_keywords() {
            should_run[idx] = true;
        }

        if let Some(automaton) = self.registry.keyword_automaton() {
            for mat in automaton.find_iter(content) {
                let keyword_idx = mat.pattern().as_usize();
                for &rule_idx in &self.registry.keyword_to_rules()[keyword_idx] {
                    should_run[rule_idx] = true;
                }
            }
        }

        should_run
            .into_iter()
            .enumerate()
            .filter_map(|(idx, run)| run.then_some(idx))
            .collect()
    }
}

/// Appends `(byte_offset, Detection)` pairs for every non-overlapping
/// match of `rule` in `content`.
fn collect_matches(rule: &Rule, content: &str, source: &str, line: Option<u32>, out: &mut Vec<(usize, Detection)>) {
    for caps in rule.regex.captures_iter(content) {
        let Some(group) = caps.get(rule.capture_group) else {
            // The group exists in the regex (validated at registry
            // construction) but did not participate in this match.
            continue;
        };

        let raw = group.as_str();

        #[cfg(feature = "tracing")]
        trace!(rule_id = %rule.id, source, "match");

        let finding = Finding {
            id: FindingId::new(&rule.id, raw),
            provider: rule.provider,
            rule_id: rule.id.as_ref().into(),
            source: source.into(),
            line,
            masked_value: mask(raw).into(),
        };
        let credential = Credential::new(rule.provider, raw.to_string());

        out.push((group.start(), Detection { finding, credential }));
    }
}
