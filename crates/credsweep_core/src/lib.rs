//! Core credential-leak scanning engine for credsweep.
//!
//! This crate discovers leaked API credentials (LLM provider keys, cloud
//! endpoints) in source trees or fetched text. It is designed to be
//! embedded: the CLI, CI hooks, and any RPC-style host call into the
//! same entry points.
//!
//! # Main Types
//!
//! - [`Scanner`] - Runs detection rules against content and produces detections
//! - [`RuleRegistry`] - Compiled rules with keyword pre-filtering
//! - [`Finding`] - A display-safe detected credential (masked value only)
//! - [`Credential`] - The raw value, obtainable only by explicit extraction
//! - [`ScanReport`] - The serializable result of a tree scan
//!
//! # Error Handling
//!
//! Structured [`thiserror`] errors throughout: [`RuleError`],
//! [`TraversalError`], [`FetchError`], [`ConfigError`], unified under
//! [`SweepError`]. Every operation returns a well-formed result even on
//! failure; nothing in this crate panics on bad input. The CLI crate
//! uses `anyhow` for propagation.

/// Binary content detection heuristics.
pub mod binary;
/// Project configuration loaded from `.credsweep.toml`.
pub mod config;
/// Error types for rule compilation and the top-level error enum.
pub mod error;
/// Display-safe findings and the raw credential handle.
pub mod finding;
/// Masking policy for rendering secrets safely.
pub mod mask;
/// Remote content acquisition and smart-scan dispatch.
pub mod remote;
/// Serializable scan reports.
pub mod report;
/// Compiled detection rules and the keyword-indexed registry.
pub mod rule;
/// The scan engine that matches rules against content.
pub mod scanner;
#[cfg(test)]
pub(crate) mod test_utils;
/// Filesystem traversal feeding eligible files to the scanner.
pub mod walk;

pub use config::{Config, ConfigError};
pub use error::{RuleError, SweepError};
pub use finding::{Credential, Detection, Finding, FindingId};
pub use mask::mask;
pub use remote::{FetchError, RemoteFetcher, SmartScan, SmartScanError, is_remote_target, scan_remote, smart_scan};
pub use report::{ScanError, ScanReport, ScanSummary};
pub use rule::{Rule, RuleRegistry};
pub use scanner::Scanner;
pub use walk::{TraversalError, TreeScan, scan_tree};

pub use credsweep_providers::{ProviderKind, ValidationError, ValidationResult, Validator};

/// Default filename for credsweep configuration.
pub const CONFIG_FILENAME: &str = ".credsweep.toml";
