//! Loader configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_TODO_BASE_URL: &str = "http://jsonplaceholder.typicode.com/todos";
pub const DEFAULT_COMMIT_DELAY_MS: u64 = 1000;
pub const DEFAULT_TITLE_MAX_CHARS: usize = 20;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while assembling the loader from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment value could not be parsed.
    #[error("config parse failed: {key}={value}")]
    Parse { key: &'static str, value: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A roster file could not be read.
    #[error("roster read failed: {0}")]
    RosterRead(#[from] std::io::Error),

    /// A roster file was not a JSON array of members.
    #[error("roster parse failed: {0}")]
    RosterParse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    pub base_url: String,
    pub commit_delay: Duration,
    pub title_max_chars: usize,
    pub timeouts: HttpTimeouts,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TODO_BASE_URL.to_string(),
            commit_delay: Duration::from_millis(DEFAULT_COMMIT_DELAY_MS),
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

impl TodoConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `TODO_BASE_URL`: to-do endpoint, queried as `<url>?userId=<id>`
    /// - `TODO_COMMIT_DELAY_MS`: default 1000
    /// - `TODO_TITLE_MAX_CHARS`: default 20
    /// - `TODO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `TODO_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when a numeric variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when a numeric value is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("TODO_BASE_URL")
            .unwrap_or_else(|| DEFAULT_TODO_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let commit_delay_ms = parse_or(&lookup, "TODO_COMMIT_DELAY_MS", DEFAULT_COMMIT_DELAY_MS)?;
        let title_max_chars = parse_or(&lookup, "TODO_TITLE_MAX_CHARS", DEFAULT_TITLE_MAX_CHARS)?;
        let timeouts = HttpTimeouts {
            request_secs: parse_or(&lookup, "TODO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "TODO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { base_url, commit_delay: Duration::from_millis(commit_delay_ms), title_max_chars, timeouts })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Parse { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
