//! Detection rules and live validation providers for credsweep.
//!
//! This crate is pure data plus network probes: static [`RuleDef`]
//! entries describing what a leaked credential looks like, and a
//! [`Validator`] that asks the issuing provider whether a credential is
//! still accepted. Compilation of rules into a scannable registry lives
//! in `credsweep_core`.

mod provider;
mod rule;
/// Built-in detection rules organised by provider.
pub mod rules;
mod validate;

pub use provider::{ParseProviderError, ProviderKind};
pub use rule::RuleDef;
pub use rules::builtin_rules;
pub use validate::{
    ANTHROPIC_VERSION, BoxFuture, CredentialValidator, VALIDATION_TIMEOUT, ValidationError, ValidationResult,
    Validator,
};

/// HTTP `User-Agent` header sent on validation and fetch requests.
pub(crate) const USER_AGENT: &str = concat!("credsweep/", env!("CARGO_PKG_VERSION"));
