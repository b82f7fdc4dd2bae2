//! Session management for the scrob client.
//!
//! This module provides:
//! - `SessionStore`: the in-memory session cell with login/logout mutators
//! - `SessionStorage`: the durable two-key store backing it
//!
//! Sessions are loaded from storage when the store is opened and persist
//! across restarts until an explicit logout.

pub mod session;
pub mod storage;

pub use session::{Session, SessionStore};
pub use storage::SessionStorage;
