//! Source configuration read from the environment.

use std::time::Duration;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "ECO_MIGRATION_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "ECO_MIGRATION_FETCH_TIMEOUT_SECS";

/// API base URL used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Request timeout used when [`TIMEOUT_ENV`] is unset or invalid.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`crate::http::HttpOccurrenceSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Base URL the occurrences path is appended to.
    pub api_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SourceConfig {
    /// Reads [`API_URL_ENV`] and [`TIMEOUT_ENV`], falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(API_URL_ENV).ok().as_deref(),
            std::env::var(TIMEOUT_ENV).ok().as_deref(),
        )
    }

    /// Builds a config from optional raw values. Blank URLs and
    /// unparseable timeouts use the defaults.
    #[must_use]
    pub fn from_values(api_url: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        let timeout = match timeout_secs.map(|s| s.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                log::warn!("Ignoring invalid {TIMEOUT_ENV}; using {DEFAULT_TIMEOUT:?}");
                DEFAULT_TIMEOUT
            }
            None => DEFAULT_TIMEOUT,
        };

        Self { api_url, timeout }
    }

    /// Returns a copy with the API URL replaced.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}
