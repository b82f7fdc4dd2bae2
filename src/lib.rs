//! Client library for the scrob music-scrobbling API.
//!
//! This crate provides two collaborating pieces:
//! - [`SessionStore`]: the current bearer token and username, persisted to
//!   local storage and exposed as an atomically-replaced snapshot.
//! - [`ApiClient`]: authenticated and public JSON requests against a
//!   configured base URL.
//!
//! Authenticated calls read the token from the session store before each
//! request; the store is only ever mutated by explicit `login`/`logout`.

pub mod api;
pub mod auth;
pub mod config;

pub use api::{ApiClient, ApiError, RequestOptions};
pub use auth::{Session, SessionStorage, SessionStore};
pub use config::Config;
