use thiserror::Error;

/// Errors that can occur when compiling a detection rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule's regular expression failed to compile.
    #[error("invalid regex in rule '{id}': {source}")]
    InvalidRegex {
        /// Identifier of the rule that failed (e.g. `"ai/openai-api-key"`).
        id: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// The rule selects a capture group its regex does not define.
    #[error("rule '{id}' selects capture group {group} but the regex defines {available}")]
    MissingCaptureGroup {
        /// Identifier of the offending rule.
        id: String,
        /// The capture group the rule asked for.
        group: usize,
        /// How many groups the compiled regex actually has.
        available: usize,
    },
}

/// Top-level error type for the credsweep scanning pipeline.
///
/// Unifies rule compilation, configuration, traversal, and remote
/// acquisition failures for callers that orchestrate the full workflow.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A rule failed to compile.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Configuration could not be read or parsed.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// A scan root could not be traversed.
    #[error(transparent)]
    Traversal(#[from] crate::walk::TraversalError),

    /// Remote content could not be acquired.
    #[error(transparent)]
    Fetch(#[from] crate::remote::FetchError),
}
