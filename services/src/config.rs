//! Endpoint configuration for the service boundaries.

use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_VALIDATE_PATH: &str = "/api/query/validate";
pub const DEFAULT_SUGGEST_FIX_PATH: &str = "/api/query/suggestfix";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ServiceConfigError {
    #[error("invalid service URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
}

/// Resolved endpoints for the validate and suggest-fix calls.
///
/// Built once at startup and handed to [`HttpQueryService`](crate::HttpQueryService);
/// nothing reads service addresses from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    validate_url: Url,
    suggest_fix_url: Url,
    timeout: Duration,
}

impl ServiceConfig {
    /// Endpoints at the default paths under `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ServiceConfigError> {
        Self::with_paths(base_url, DEFAULT_VALIDATE_PATH, DEFAULT_SUGGEST_FIX_PATH)
    }

    pub fn with_paths(
        base_url: &str,
        validate_path: &str,
        suggest_fix_path: &str,
    ) -> Result<Self, ServiceConfigError> {
        let base = parse_url(base_url)?;
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(ServiceConfigError::UnsupportedScheme(other.to_string())),
        }
        Ok(Self {
            validate_url: join(&base, validate_path)?,
            suggest_fix_url: join(&base, suggest_fix_path)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn validate_url(&self) -> &Url {
        &self.validate_url
    }

    #[must_use]
    pub fn suggest_fix_url(&self) -> &Url {
        &self.suggest_fix_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn parse_url(raw: &str) -> Result<Url, ServiceConfigError> {
    Url::parse(raw.trim()).map_err(|source| ServiceConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

fn join(base: &Url, path: &str) -> Result<Url, ServiceConfigError> {
    base.join(path)
        .map_err(|source| ServiceConfigError::InvalidUrl {
            url: format!("{base}{path}"),
            source,
        })
}
