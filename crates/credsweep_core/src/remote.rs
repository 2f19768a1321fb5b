//! Remote content acquisition and smart-scan dispatch.
//!
//! The engine never speaks HTTP itself; callers hand it a
//! [`RemoteFetcher`] and the engine decides when to use it. That keeps
//! this crate network-free and makes remote scanning testable with
//! in-memory fetchers.

use std::path::Path;

use credsweep_providers::BoxFuture;
#[cfg(feature = "tracing")]
use tracing::debug;

use crate::config::Config;
use crate::finding::Detection;
use crate::scanner::Scanner;
use crate::walk::{TraversalError, TreeScan, scan_tree};

/// Fetched content shorter than this is treated as a fetch failure.
///
/// A hosted-file endpoint that returns an error page, a redirect stub,
/// or an empty body must surface as an error, never as a clean scan.
pub const MIN_REMOTE_CONTENT_CHARS: usize = 10;

/// Errors from acquiring remote content.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The target could not be fetched at all.
    #[error("failed to fetch {target}: {message}")]
    Unavailable {
        /// The remote target that failed.
        target: Box<str>,
        /// Transport-level detail.
        message: Box<str>,
    },

    /// The fetch succeeded but returned too little content to be a
    /// real file.
    #[error("fetched content from {target} is too short ({chars} chars) to be scannable")]
    TooShort {
        /// The remote target that was fetched.
        target: Box<str>,
        /// Number of characters actually received.
        chars: usize,
    },
}

/// Acquires text content for a remote target.
///
/// Implementations own their transport entirely (HTTP client, URL
/// rewriting, size caps). They should return [`FetchError::Unavailable`]
/// for transport failures and leave the short-content check to
/// [`scan_remote`].
pub trait RemoteFetcher: Send + Sync {
    /// Fetches the content behind `target` as text.
    fn fetch<'a>(&'a self, target: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// Fetches a remote target and scans its content as one buffer.
///
/// Findings are labelled with the target itself as their source.
pub async fn scan_remote(
    scanner: &Scanner,
    target: &str,
    fetcher: &dyn RemoteFetcher,
) -> Result<Vec<Detection>, FetchError> {
    let content = fetcher.fetch(target).await?;

    let chars = content.chars().count();
    if chars < MIN_REMOTE_CONTENT_CHARS {
        return Err(FetchError::TooShort {
            target: target.into(),
            chars,
        });
    }

    #[cfg(feature = "tracing")]
    debug!(target, chars, "scanning remote content");

    Ok(scanner.scan(&content, target))
}

/// Returns `true` if a target names remote content rather than a local
/// path.
///
/// Recognized forms: anything carrying a `github.com` host marker, or
/// an explicit `http://` / `https://` scheme. Everything else is
/// treated as a filesystem path.
#[must_use]
pub fn is_remote_target(target: &str) -> bool {
    target.contains("github.com") || target.starts_with("http://") || target.starts_with("https://")
}

/// The outcome of a [`smart_scan`] dispatch.
#[derive(Debug)]
pub enum SmartScan {
    /// The target was fetched and scanned as one remote buffer.
    Remote {
        /// The target as given.
        source: String,
        /// Detections from the fetched content.
        detections: Vec<Detection>,
    },
    /// The target was walked as a local tree.
    Local(TreeScan),
}

/// Errors from either arm of a smart scan.
#[derive(Debug, thiserror::Error)]
pub enum SmartScanError {
    /// The remote arm failed to acquire content.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The local arm could not start traversal.
    #[error(transparent)]
    Traversal(#[from] TraversalError),
}

/// Scans a target wherever it lives: remote targets go through
/// `fetcher`, everything else is walked as a local tree under `config`.
pub async fn smart_scan(
    scanner: &Scanner,
    target: &str,
    fetcher: &dyn RemoteFetcher,
    config: &Config,
) -> Result<SmartScan, SmartScanError> {
    if is_remote_target(target) {
        let detections = scan_remote(scanner, target, fetcher).await?;
        Ok(SmartScan::Remote {
            source: target.to_string(),
            detections,
        })
    } else {
        let tree = scan_tree(scanner, Path::new(target), config)?;
        Ok(SmartScan::Local(tree))
    }
}

#[cfg(test)]
mod tests {
    use credsweep_providers::ProviderKind;

    use super::*;
    use crate::rule::RuleRegistry;

    /// Fetcher that always returns the same canned content.
    struct FixedFetcher(String);

    impl RemoteFetcher for FixedFetcher {
        fn fetch<'a>(&'a self, _target: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
            let content = self.0.clone();
            Box::pin(async move { Ok(content) })
        }
    }

    /// Fetcher that always fails at the transport level.
    struct DownFetcher;

    impl RemoteFetcher for DownFetcher {
        fn fetch<'a>(&'a self, target: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
            Box::pin(async move {
                Err(FetchError::Unavailable {
                    target: target.into(),
                    message: "connection refused".into(),
                })
            })
        }
    }

    fn builtin_scanner() -> Scanner {
        Scanner::new(RuleRegistry::builtin().unwrap())
    }

    fn openai_key() -> String {
        format!("sk-{}", "x".repeat(40))
    }

    #[test]
    fn remote_targets_are_recognized() {
        assert!(is_remote_target("https://github.com/acme/app/blob/main/config.py"));
        assert!(is_remote_target("github.com/acme/app"));
        assert!(is_remote_target("http://internal.example/snippet.txt"));
        assert!(is_remote_target("https://gist.example/raw/abc"));

        assert!(!is_remote_target("./src"));
        assert!(!is_remote_target("/home/dev/project"));
        assert!(!is_remote_target("docs/github.md"));
    }

    #[tokio::test]
    async fn scan_remote_finds_keys_in_fetched_content() {
        let key = openai_key();
        let fetcher = FixedFetcher(format!("# leaked\nAPI_KEY = {key}\n"));
        let target = "https://github.com/acme/app/blob/main/conf.py";

        let detections = scan_remote(&builtin_scanner(), target, &fetcher).await.unwrap();

        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].finding.source.as_ref(), target);
        assert_eq!(detections[0].finding.provider, ProviderKind::OpenAi);
    }

    #[tokio::test]
    async fn empty_fetch_is_an_error_not_a_clean_scan() {
        let fetcher = FixedFetcher(String::new());
        let err = scan_remote(&builtin_scanner(), "https://github.com/a/b", &fetcher)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::TooShort { chars: 0, .. }));
    }

    #[tokio::test]
    async fn short_stub_content_is_rejected() {
        let fetcher = FixedFetcher("404: Not".to_string());
        let err = scan_remote(&builtin_scanner(), "https://github.com/a/b", &fetcher)
            .await
            .unwrap_err();

        match err {
            FetchError::TooShort { chars, .. } => assert_eq!(chars, 8),
            FetchError::Unavailable { .. } => panic!("expected TooShort"),
        }
    }

    #[tokio::test]
    async fn content_at_the_minimum_length_is_scanned() {
        let fetcher = FixedFetcher("0123456789".to_string());
        let detections = scan_remote(&builtin_scanner(), "https://github.com/a/b", &fetcher)
            .await
            .unwrap();
        assert!(detections.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let err = scan_remote(&builtin_scanner(), "https://github.com/a/b", &DownFetcher)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn smart_scan_dispatches_urls_to_the_fetcher() {
        let key = openai_key();
        let fetcher = FixedFetcher(format!("token: {key}"));

        let result = smart_scan(
            &builtin_scanner(),
            "https://github.com/acme/app/blob/main/x.env",
            &fetcher,
            &Config::default(),
        )
        .await
        .unwrap();

        match result {
            SmartScan::Remote { source, detections } => {
                assert!(source.contains("github.com"));
                assert_eq!(detections.len(), 1);
            }
            SmartScan::Local(_) => panic!("expected remote dispatch"),
        }
    }

    #[tokio::test]
    async fn smart_scan_dispatches_paths_to_traversal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), openai_key()).unwrap();
        let target = dir.path().display().to_string();

        let result = smart_scan(&builtin_scanner(), &target, &DownFetcher, &Config::default())
            .await
            .unwrap();

        match result {
            SmartScan::Local(tree) => assert_eq!(tree.detections().len(), 1),
            SmartScan::Remote { .. } => panic!("expected local dispatch"),
        }
    }

    #[tokio::test]
    async fn smart_scan_surfaces_missing_local_path() {
        let err = smart_scan(
            &builtin_scanner(),
            "/no/such/credsweep/path",
            &DownFetcher,
            &Config::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SmartScanError::Traversal(TraversalError::PathNotFound { .. })));
    }
}
