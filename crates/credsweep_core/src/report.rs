//! Serializable scan reports.

use serde::{Deserialize, Serialize};

use crate::finding::Finding;

/// A per-file failure recorded during traversal.
///
/// One unreadable file never aborts a scan; it becomes one of these
/// alongside the findings from every other file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanError {
    /// Root-relative path (or target identifier) that failed.
    pub source: Box<str>,
    /// What went wrong, in human terms.
    pub message: Box<str>,
}

/// Headline numbers for a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Total number of findings in the report.
    pub total_detections: usize,
    /// Absolute path (or remote target) that was scanned.
    pub scanned_path: Box<str>,
}

/// The complete, display-safe result of a scan.
///
/// Constructed fresh per invocation and discarded by the caller;
/// nothing is persisted. Findings appear in discovery order: traversal
/// order, then within-file position. Round-trips through JSON without
/// loss (masking is the only intentional information drop, and it
/// happens before a report exists).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Headline numbers.
    pub summary: ScanSummary,
    /// Every finding, in discovery order.
    pub findings: Vec<Finding>,
    /// Per-file failures, in discovery order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scan_errors: Vec<ScanError>,
}

impl ScanReport {
    /// Assembles a report from findings and errors.
    #[must_use]
    pub fn new(scanned_path: &str, findings: Vec<Finding>, scan_errors: Vec<ScanError>) -> Self {
        Self {
            summary: ScanSummary {
                total_detections: findings.len(),
                scanned_path: scanned_path.into(),
            },
            findings,
            scan_errors,
        }
    }

    /// Returns `true` if the scan found nothing and hit no errors.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.scan_errors.is_empty()
    }
}
