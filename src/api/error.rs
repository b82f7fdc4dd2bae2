use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in")]
    Unauthenticated,

    #[error("Profile for {0} is private")]
    PrivateProfile(String),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("API Error: {0}")]
    Api(String),

    #[error("Invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Map a non-success status to an error, carrying the reason phrase.
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        ApiError::Api(status_text(status))
    }

    /// Map a non-success status on a public profile call. 403 and 404 get
    /// dedicated variants so callers can distinguish a private profile from
    /// an unknown user.
    pub(crate) fn from_public_status(status: reqwest::StatusCode, username: &str) -> Self {
        match status.as_u16() {
            403 => ApiError::PrivateProfile(username.to_string()),
            404 => ApiError::UserNotFound(username.to_string()),
            _ => Self::from_status(status),
        }
    }
}

/// Status text like "500 Internal Server Error", falling back to the bare
/// code for statuses without a canonical reason.
fn status_text(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
