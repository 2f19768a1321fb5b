//! HTTP-backed remote content fetcher.

use std::time::Duration;

use credsweep_core::{FetchError, RemoteFetcher};
use credsweep_providers::BoxFuture;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Responses larger than this are refused rather than buffered.
const MAX_FETCH_BYTES: u64 = 10 * 1024 * 1024;

const USER_AGENT: &str = concat!("credsweep/", env!("CARGO_PKG_VERSION"));

/// Fetches remote targets over HTTPS.
///
/// GitHub web URLs are rewritten to their raw-content form, since the
/// `blob` pages serve HTML rather than the file itself.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher with a shared client and request timeout.
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl RemoteFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, target: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(async move {
            let url = normalize_target(target);

            let unavailable = |message: String| FetchError::Unavailable {
                target: target.into(),
                message: message.into(),
            };

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| unavailable(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(unavailable(format!("HTTP {status}")));
            }

            if let Some(len) = response.content_length() {
                if len > MAX_FETCH_BYTES {
                    return Err(unavailable(format!("response of {len} bytes exceeds fetch limit")));
                }
            }

            let body = read_capped(response, MAX_FETCH_BYTES)
                .await
                .map_err(unavailable)?;
            Ok(String::from_utf8_lossy(&body).into_owned())
        })
    }
}

/// Buffers a response body, refusing it once it grows past `cap`.
///
/// Chunked responses carry no `Content-Length`, so the cap has to be
/// enforced while reading, not just up front.
async fn read_capped(mut response: reqwest::Response, cap: u64) -> Result<Vec<u8>, String> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| e.to_string())? {
        if (body.len() + chunk.len()) as u64 > cap {
            return Err(format!("response exceeds fetch limit of {cap} bytes"));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Rewrites recognized target shapes into directly fetchable URLs.
///
/// - `github.com/...` without a scheme gains `https://`
/// - `github.com/{owner}/{repo}/blob/{ref}/{path}` becomes the matching
///   `raw.githubusercontent.com` URL
///
/// Anything else passes through untouched.
fn normalize_target(target: &str) -> String {
    let with_scheme = if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("https://{target}")
    };

    match with_scheme.split_once("github.com/") {
        Some((scheme, rest)) if scheme.ends_with("://") => rewrite_github_blob(rest)
            .unwrap_or(with_scheme),
        _ => with_scheme,
    }
}

/// Maps `{owner}/{repo}/blob/{ref}/{path}` to the raw content host.
fn rewrite_github_blob(rest: &str) -> Option<String> {
    let mut parts = rest.splitn(4, '/');
    let owner = parts.next()?;
    let repo = parts.next()?;
    if parts.next()? != "blob" {
        return None;
    }
    let ref_and_path = parts.next()?;

    Some(format!("https://raw.githubusercontent.com/{owner}/{repo}/{ref_and_path}"))
}
