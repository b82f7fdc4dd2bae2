//! API client for the scrob music-scrobbling service.
//!
//! This module provides the `ApiClient` struct for fetching recent scrobbles
//! and top artist/track/album charts, both for the logged-in user and for
//! public profiles.

use std::sync::Arc;

use reqwest::{header, Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::config::Config;

use super::ApiError;

/// Default number of entries for the recent-scrobbles endpoints.
const DEFAULT_RECENT_LIMIT: u32 = 20;

/// Default number of entries for the top-chart endpoints.
const DEFAULT_TOP_LIMIT: u32 = 10;

/// Where the bearer token for authenticated calls comes from.
#[derive(Clone)]
enum AuthMode {
    /// Read the token from the session store before each call (canonical).
    Session(Arc<SessionStore>),
    /// Fixed token from configuration (legacy static-token mode).
    Static(String),
}

/// Per-call overrides for [`ApiClient::request`].
///
/// Defaults to a GET with no body. Caller-supplied headers take precedence
/// over the client's defaults on key collision.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub body: Option<Value>,
    pub headers: header::HeaderMap,
}

/// API client for the scrob service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: AuthMode,
}

impl ApiClient {
    /// Create a client whose authenticated calls use the session store's
    /// current token.
    pub fn new(config: &Config, store: Arc<SessionStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            auth: AuthMode::Session(store),
        }
    }

    /// Create a client using the fixed token from configuration. Fails with
    /// `Unauthenticated` if the configuration carries no token.
    pub fn with_static_token(config: &Config) -> Result<Self, ApiError> {
        let token = config.api_token.clone().ok_or(ApiError::Unauthenticated)?;
        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            auth: AuthMode::Static(token),
        })
    }

    fn token(&self) -> Option<String> {
        match &self.auth {
            AuthMode::Session(store) => store.token(),
            AuthMode::Static(token) => Some(token.clone()),
        }
    }

    /// Issue an authenticated request against `<base>/<endpoint>`.
    ///
    /// The current token is read first; if there is none, this fails with
    /// `Unauthenticated` without touching the network. A single attempt is
    /// made - no timeout, retry, or backoff.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let token = self.token().ok_or(ApiError::Unauthenticated)?;

        let method = options.method.unwrap_or(Method::GET);
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, url = %url, "API request");

        let mut builder = self
            .client
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(token);
        if let Some(ref body) = options.body {
            builder = builder.json(body);
        }
        // Applied last so caller headers replace the defaults above.
        if !options.headers.is_empty() {
            builder = builder.headers(options.headers);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %url, "API request failed");
            return Err(ApiError::from_status(status));
        }

        decode(response).await
    }

    /// Issue an unauthenticated request against
    /// `<base>/users/<username>/<endpoint>`.
    async fn public_get(&self, username: &str, endpoint: &str) -> Result<Value, ApiError> {
        let url = format!("{}/users/{}/{}", self.base_url, username, endpoint);
        debug!(url = %url, "Public API request");

        let response = self
            .client
            .get(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, username, "Public API request failed");
            return Err(ApiError::from_public_status(status, username));
        }

        decode(response).await
    }

    // ===== Authenticated endpoints =====

    /// Fetch the logged-in user's most recent scrobbles (default 20).
    pub async fn get_recent_scrobbles(&self, limit: Option<u32>) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        self.request(&format!("/recent?limit={limit}"), RequestOptions::default())
            .await
    }

    /// Fetch the logged-in user's top artists (default 10).
    pub async fn get_top_artists(&self, limit: Option<u32>) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_TOP_LIMIT);
        self.request(&format!("/top/artists?limit={limit}"), RequestOptions::default())
            .await
    }

    /// Fetch the logged-in user's top tracks (default 10).
    pub async fn get_top_tracks(&self, limit: Option<u32>) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_TOP_LIMIT);
        self.request(&format!("/top/tracks?limit={limit}"), RequestOptions::default())
            .await
    }

    /// Fetch the logged-in user's top albums (default 10).
    pub async fn get_top_albums(&self, limit: Option<u32>) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_TOP_LIMIT);
        self.request(&format!("/top/albums?limit={limit}"), RequestOptions::default())
            .await
    }

    // ===== Public profile endpoints =====

    /// Fetch a public profile's most recent scrobbles (default 20).
    pub async fn get_public_recent_scrobbles(
        &self,
        username: &str,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        self.public_get(username, &format!("recent?limit={limit}"))
            .await
    }

    /// Fetch a public profile's top artists (default 10).
    pub async fn get_public_top_artists(
        &self,
        username: &str,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_TOP_LIMIT);
        self.public_get(username, &format!("top/artists?limit={limit}"))
            .await
    }

    /// Fetch a public profile's top tracks (default 10).
    pub async fn get_public_top_tracks(
        &self,
        username: &str,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_TOP_LIMIT);
        self.public_get(username, &format!("top/tracks?limit={limit}"))
            .await
    }

    /// Fetch a public profile's top albums (default 10).
    pub async fn get_public_top_albums(
        &self,
        username: &str,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_TOP_LIMIT);
        self.public_get(username, &format!("top/albums?limit={limit}"))
            .await
    }
}

/// Decode a successful response body as JSON. The body is read as text first
/// so a malformed body surfaces as a decode error, not a network error.
async fn decode(response: reqwest::Response) -> Result<Value, ApiError> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionStorage;
    use tempfile::TempDir;

    #[test]
    fn test_static_token_requires_config_token() {
        let config = Config::new("http://localhost:3000");
        assert!(matches!(
            ApiClient::with_static_token(&config),
            Err(ApiError::Unauthenticated)
        ));

        let config = config.with_api_token("tok");
        let client = ApiClient::with_static_token(&config).unwrap();
        assert_eq!(client.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_session_client_token_follows_store() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SessionStore::open(SessionStorage::with_dir(dir.path())).unwrap());
        let client = ApiClient::new(&Config::default(), store.clone());

        assert_eq!(client.token(), None);
        store.login("tok123", "alice").unwrap();
        assert_eq!(client.token().as_deref(), Some("tok123"));
        store.logout().unwrap();
        assert_eq!(client.token(), None);
    }
}
