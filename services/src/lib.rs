//! Service boundaries for query validation and fix suggestion.
//!
//! # Architecture
//!
//! - [`QueryService`] - the seam the session driver talks to; tests plug in fakes
//! - [`HttpQueryService`] - the real implementation, JSON over HTTP via `reqwest`
//! - [`ServiceConfig`] - endpoint URLs and timeout, injected at construction
//!
//! # Error Handling
//!
//! Transport problems (connection errors, non-success status, undecodable
//! bodies) are caught here and collapsed into [`ValidationOutcome::Failed`] /
//! [`SuggestionOutcome::Failed`]. Callers never see an `Err` from a boundary
//! call; the underlying [`ServiceError`] is only logged.
//!
//! No retries are performed. Each action is retried by the user invoking it
//! again.

mod config;
mod http;
mod wire;

use std::future::Future;
use std::time::Duration;

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_SUGGEST_FIX_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_VALIDATE_PATH,
    ServiceConfig, ServiceConfigError,
};
pub use http::HttpQueryService;
pub use querylens_types::{RawIssue, SuggestionOutcome, ValidationOutcome};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Remote validation and fix suggestion.
///
/// Both calls are fire-and-await and cannot be cancelled; staleness is the
/// caller's concern.
pub trait QueryService: Send + Sync + 'static {
    /// Send the query text to the validator.
    fn validate(&self, query: &str) -> impl Future<Output = ValidationOutcome> + Send;

    /// Ask for a corrected query given the issues the user currently sees.
    fn suggest_fix(
        &self,
        query: &str,
        issues: &[RawIssue],
    ) -> impl Future<Output = SuggestionOutcome> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, ServiceError> {
    use reqwest::header::{HeaderMap, HeaderValue};

    let mut default_headers = HeaderMap::new();
    default_headers.insert("Accept", HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
        .default_headers(default_headers)
        .build()
        .map_err(ServiceError::Client)
}

pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    use futures_util::StreamExt;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}
