//! Display-safe findings and the raw credential handle.
//!
//! The two shapes are deliberately separate: [`Finding`] carries only a
//! masked value and is the shape that serializes into reports, while
//! [`Credential`] holds the raw value for live validation and implements
//! neither `Serialize` nor a revealing `Debug`. A default serialization
//! path can therefore never leak a raw secret.

use std::fmt;

use credsweep_providers::ProviderKind;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::mask::mask;

const FINDING_ID_LENGTH: usize = 12;
const FINDING_ID_BYTES: usize = FINDING_ID_LENGTH / 2;

/// Stable identifier for a finding, derived from the rule ID and the
/// credential content.
///
/// The same credential detected by the same rule always produces the
/// same ID, regardless of which file or remote target it was found in.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingId(Box<str>);

impl FindingId {
    /// Creates a finding ID by hashing the rule ID and raw value.
    #[must_use]
    pub fn new(rule_id: &str, raw_value: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(rule_id.as_bytes());
        hasher.update(raw_value.as_bytes());
        let hash = hasher.finalize();
        Self(hex::encode(&hash[..FINDING_ID_BYTES]).into())
    }

    /// Returns the hex string representation of this ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FindingId({})", self.0)
    }
}

impl fmt::Display for FindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One located occurrence of a credential-shaped string, safe to display.
///
/// Produced transiently per scan call and never persisted. `line` is
/// present only for line-mode scans; whole-buffer scans (the default)
/// leave it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Stable identifier derived from the rule and credential content.
    pub id: FindingId,
    /// The provider whose credential shape matched.
    pub provider: ProviderKind,
    /// Identifier of the rule that matched (e.g. `"ai/openai-api-key"`).
    pub rule_id: Box<str>,
    /// Where the credential was found: a root-relative file path or a
    /// remote target identifier.
    pub source: Box<str>,
    /// 1-based line number; only set by line-mode scanning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// The credential rendered through the masking policy.
    pub masked_value: Box<str>,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {} ({})", self.source, line, self.masked_value, self.provider),
            None => write!(f, "{}: {} ({})", self.source, self.masked_value, self.provider),
        }
    }
}

/// A raw credential extracted for live validation.
///
/// Not serializable, and `Debug` shows only the masked form. The only
/// way to obtain one is to explicitly consume a [`Detection`].
#[derive(Clone)]
pub struct Credential {
    provider: ProviderKind,
    raw: String,
}

impl Credential {
    /// Wraps a raw credential value.
    #[must_use]
    pub fn new(provider: ProviderKind, raw: String) -> Self {
        Self { provider, raw }
    }

    /// The provider this credential belongs to.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// The raw credential value. Handle with care; this is the one place
    /// the unmasked secret is reachable.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("provider", &self.provider)
            .field("value", &mask(&self.raw))
            .finish()
    }
}

/// A finding paired with the credential that produced it.
///
/// The scanner returns these; report builders keep the `Finding` half
/// and drop the credential unless the caller explicitly extracts it.
#[derive(Debug, Clone)]
pub struct Detection {
    /// The display-safe half.
    pub finding: Finding,
    /// The raw half, for validation.
    pub credential: Credential,
}

impl Detection {
    /// Consumes the detection, returning only the raw credential.
    #[must_use]
    pub fn into_credential(self) -> Credential {
        self.credential
    }
}
