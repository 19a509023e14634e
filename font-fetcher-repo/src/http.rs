//! HTTP client helper with native-tls support.

use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

use crate::error::{FetchError, Result};

/// Default global timeout for all HTTP operations (30 seconds).
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum response body size for search pages (10 MB).
pub const MAX_PAGE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum response body size for font archive downloads (100 MB).
pub const MAX_DOWNLOAD_SIZE: u64 = 100 * 1024 * 1024;

/// Some font sites reject requests without a user agent.
const USER_AGENT: &str = concat!("font-fetcher/", env!("CARGO_PKG_VERSION"));

/// A downloaded body together with its declared content type.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Validate that a URL is usable for font downloads.
///
/// Only `http` and `https` are accepted; `file://` and friends are rejected
/// so a scraped link can never read local files.
pub fn validate_url(url: &str) -> Result<url::Url> {
    let parsed =
        url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("'{}': {}", url, e)))?;
    match parsed.scheme() {
        "https" | "http" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl(format!(
            "scheme '{}' rejected, only http(s) is allowed: {}",
            scheme, url
        ))),
    }
}

/// Create a new HTTP agent configured with native-tls and a global timeout.
pub fn agent(timeout: Duration) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(timeout))
        .build()
        .into()
}

fn http_error(url: &str, err: ureq::Error) -> FetchError {
    let message = match err {
        ureq::Error::StatusCode(code) => format!("server responded with status {}", code),
        other => other.to_string(),
    };
    FetchError::Http {
        url: url.to_string(),
        message,
    }
}

/// Fetch a page and return it as text.
pub fn get_text(agent: &Agent, url: &str) -> Result<String> {
    validate_url(url)?;
    agent
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| http_error(url, e))?
        .into_body()
        .with_config()
        .limit(MAX_PAGE_SIZE)
        .read_to_string()
        .map_err(|e| http_error(url, e))
}

/// Download a file and return its bytes and content type.
///
/// Non-success statuses are errors and are not retried. The body is limited
/// to [`MAX_DOWNLOAD_SIZE`].
pub fn download(agent: &Agent, url: &str) -> Result<Download> {
    validate_url(url)?;
    let response = agent
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| http_error(url, e))?;
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .into_body()
        .with_config()
        .limit(MAX_DOWNLOAD_SIZE)
        .read_to_vec()
        .map_err(|e| http_error(url, e))?;
    Ok(Download {
        bytes,
        content_type,
    })
}
