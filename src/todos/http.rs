//! HTTP to-do source.
//!
//! Thin wrapper over `GET <base_url>?userId=<id>`. Pure parsing in
//! `parse_todos` for testability.

use std::time::Duration;

use super::types::{FetchError, ToDoItem, TodoSource};
use crate::config::{ConfigError, HttpTimeouts, TodoConfig};

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpTodoSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTodoSource {
    /// Build a source for `base_url` with the given transport timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, timeouts: HttpTimeouts) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn from_config(config: &TodoConfig) -> Result<Self, ConfigError> {
        Self::new(config.base_url.clone(), config.timeouts)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn todos_url(&self, member_id: i64) -> String {
        format!("{}?userId={member_id}", self.base_url)
    }
}

#[async_trait::async_trait]
impl TodoSource for HttpTodoSource {
    async fn fetch_todos(&self, member_id: i64) -> Result<Vec<ToDoItem>, FetchError> {
        let url = self.todos_url(member_id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport { message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Backend {
                status: status.as_u16(),
                message: format!("Http failure response for {url}: {status}"),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Transport { message: e.to_string() })?;

        parse_todos(&text).map_err(|e| {
            tracing::debug!(%url, error = %e, "to-do body failed to decode");
            FetchError::Backend { status: status.as_u16(), message: format!("Http failure during parsing for {url}") }
        })
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_todos(json: &str) -> Result<Vec<ToDoItem>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
