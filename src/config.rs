//! Client configuration.
//!
//! Configuration is constructed once at startup and passed into the client;
//! the client itself never reads the environment.

use std::env;

/// Default API base URL when `SCROB_API_URL` is not set.
const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Environment variable holding the API base URL.
const API_URL_VAR: &str = "SCROB_API_URL";

/// Environment variable holding a fixed API token (legacy static-token mode).
const API_TOKEN_VAR: &str = "SCROB_API_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the scrob API, without a trailing slash.
    pub base_url: String,
    /// Fixed bearer token for the legacy static-token client.
    /// The session-based client ignores this.
    pub api_token: Option<String>,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            api_token: None,
        }
    }

    /// Build a config from `SCROB_API_URL` and `SCROB_API_TOKEN`.
    /// A missing base URL falls back to `http://localhost:3000`.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self {
            base_url: normalize_base_url(base_url),
            api_token: env::var(API_TOKEN_VAR).ok(),
        }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_normalized() {
        let config = Config::new("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000");

        let config = Config::new("https://scrob.example//");
        assert_eq!(config.base_url, "https://scrob.example");
    }

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_with_api_token() {
        let config = Config::new("http://localhost:3000").with_api_token("tok");
        assert_eq!(config.api_token.as_deref(), Some("tok"));
    }
}
