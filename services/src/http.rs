//! `reqwest`-backed implementation of [`QueryService`].

use querylens_types::{RawIssue, SuggestionOutcome, ValidationOutcome};
use serde::Serialize;
use url::Url;

use crate::wire::{self, SuggestFixRequest, ValidateRequest};
use crate::{QueryService, ServiceConfig, ServiceError, build_client, read_capped_error_body};

/// JSON-over-HTTP client for the validator and fix-suggestion endpoints.
#[derive(Debug, Clone)]
pub struct HttpQueryService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpQueryService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = build_client(config.timeout())?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validate call with the transport error left visible.
    pub async fn request_issues(&self, query: &str) -> Result<Vec<RawIssue>, ServiceError> {
        let body = self
            .post_json(self.config.validate_url(), &ValidateRequest { query })
            .await?;
        Ok(wire::issues_from_value(body))
    }

    /// Suggest-fix call with the transport error left visible.
    ///
    /// `Ok(None)` means the service answered without usable text.
    pub async fn request_suggestion(
        &self,
        query: &str,
        issues: &[RawIssue],
    ) -> Result<Option<String>, ServiceError> {
        let body = self
            .post_json(
                self.config.suggest_fix_url(),
                &SuggestFixRequest { query, issues },
            )
            .await?;
        Ok(wire::suggestion_from_value(body))
    }

    async fn post_json<T: Serialize + Sync>(
        &self,
        url: &Url,
        body: &T,
    ) -> Result<serde_json::Value, ServiceError> {
        let response = self.client.post(url.clone()).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            return Err(ServiceError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl QueryService for HttpQueryService {
    async fn validate(&self, query: &str) -> ValidationOutcome {
        match self.request_issues(query).await {
            Ok(issues) => {
                tracing::debug!(count = issues.len(), "Validate request completed");
                ValidationOutcome::Completed(issues)
            }
            Err(e) => {
                tracing::warn!(%e, url = %self.config.validate_url(), "Validate request failed");
                ValidationOutcome::Failed
            }
        }
    }

    async fn suggest_fix(&self, query: &str, issues: &[RawIssue]) -> SuggestionOutcome {
        match self.request_suggestion(query, issues).await {
            Ok(Some(text)) => SuggestionOutcome::Suggested(text),
            Ok(None) => SuggestionOutcome::Empty,
            Err(e) => {
                tracing::warn!(%e, url = %self.config.suggest_fix_url(), "Suggest-fix request failed");
                SuggestionOutcome::Failed
            }
        }
    }
}
