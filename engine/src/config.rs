use serde::Deserialize;
use std::{env, path::Path, path::PathBuf, time::Duration};

use querylens_services::{
    DEFAULT_BASE_URL, DEFAULT_SUGGEST_FIX_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_VALIDATE_PATH,
    ServiceConfig, ServiceConfigError,
};

/// Overrides `[service] base_url` when set and non-empty.
pub const SERVICE_URL_ENV: &str = "QUERYLENS_SERVICE_URL";

#[derive(Debug, Default, Deserialize)]
pub struct QuerylensConfig {
    pub app: Option<AppConfig>,
    pub service: Option<ServiceSection>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    InvalidUrl(#[from] ServiceConfigError),
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::InvalidUrl(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for gutter markers.
    #[serde(default)]
    pub ascii_only: bool,
}

/// Where the validator and fix-suggestion endpoints live.
///
/// ```toml
/// [service]
/// base_url = "http://localhost:8000"
/// validate_path = "/api/query/validate"
/// suggest_fix_path = "/api/query/suggestfix"
/// timeout_seconds = 60
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ServiceSection {
    pub base_url: Option<String>,
    pub validate_path: Option<String>,
    pub suggest_fix_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Replace `${VAR}` references with the variable's value; unset variables
/// become empty. An unclosed `${` is left as written.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

impl QuerylensConfig {
    /// Load `~/.querylens/config.toml`. `Ok(None)` when it does not exist.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), %source, "Failed to read config");
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| {
            tracing::warn!(path = %path.display(), %source, "Failed to parse config");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ascii_only(&self) -> bool {
        self.app.as_ref().is_some_and(|app| app.ascii_only)
    }

    /// Resolve endpoints, honoring the `QUERYLENS_SERVICE_URL` override.
    pub fn service_config(&self) -> Result<ServiceConfig, ConfigError> {
        self.service_config_with_override(env::var(SERVICE_URL_ENV).ok())
    }

    pub fn service_config_with_override(
        &self,
        url_override: Option<String>,
    ) -> Result<ServiceConfig, ConfigError> {
        let section = self.service.as_ref();
        let base_url = url_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| section.and_then(|s| s.base_url.as_deref()).map(expand_env_vars))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let validate_path = section
            .and_then(|s| s.validate_path.as_deref())
            .unwrap_or(DEFAULT_VALIDATE_PATH);
        let suggest_fix_path = section
            .and_then(|s| s.suggest_fix_path.as_deref())
            .unwrap_or(DEFAULT_SUGGEST_FIX_PATH);
        let timeout = section
            .and_then(|s| s.timeout_seconds)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let config = ServiceConfig::with_paths(&base_url, validate_path, suggest_fix_path)?
            .with_timeout(Duration::from_secs(timeout));
        tracing::debug!(
            validate = %config.validate_url(),
            suggest_fix = %config.suggest_fix_url(),
            timeout_secs = timeout,
            "Resolved service endpoints"
        );
        Ok(config)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".querylens").join("config.toml"))
}
