//! HTTP client module for the scrob API.
//!
//! Provides the `ApiClient` for fetching scrobble history and top charts,
//! authenticated with a bearer token read from the session store. Public
//! profile endpoints need no credentials.

pub mod client;
pub mod error;

pub use client::{ApiClient, RequestOptions};
pub use error::ApiError;
