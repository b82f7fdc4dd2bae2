use std::sync::RwLock;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::storage::{SessionStorage, TOKEN_KEY, USERNAME_KEY};

/// Snapshot of the current authentication state.
///
/// Invariant: `is_authenticated` is true iff `token` is present. Sessions are
/// replaced wholesale on login/logout, never partially mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
    pub is_authenticated: bool,
}

impl Session {
    fn authenticated(token: String, username: String) -> Self {
        Self {
            token: Some(token),
            username: Some(username),
            is_authenticated: true,
        }
    }
}

/// Holds the current session in memory, backed by durable storage.
///
/// Readers get complete snapshots via [`current`](Self::current); the only
/// mutations are [`login`](Self::login) and [`logout`](Self::logout), which
/// persist first and then replace the in-memory session in one assignment.
pub struct SessionStore {
    storage: SessionStorage,
    session: RwLock<Session>,
}

impl SessionStore {
    /// Open the store, initializing the in-memory session from whatever is
    /// persisted. A stored token means the session starts authenticated.
    pub fn open(storage: SessionStorage) -> Result<Self> {
        let token = storage.get(TOKEN_KEY)?;
        let username = storage.get(USERNAME_KEY)?;
        let session = Session {
            is_authenticated: token.is_some(),
            token,
            username,
        };
        debug!(authenticated = session.is_authenticated, "Session store opened");
        Ok(Self {
            storage,
            session: RwLock::new(session),
        })
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.session.read().expect("session lock poisoned").clone()
    }

    /// The current bearer token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    /// Persist the token and username, then publish the authenticated session.
    ///
    /// The durable write happens before the in-memory replace, so observers
    /// never see an authenticated session that is not persisted. If the write
    /// fails, the in-memory session is left untouched.
    pub fn login(&self, token: &str, username: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USERNAME_KEY, username)?;

        let mut session = self.session.write().expect("session lock poisoned");
        *session = Session::authenticated(token.to_string(), username.to_string());
        debug!(username, "Logged in");
        Ok(())
    }

    /// Remove both persisted keys, then publish the logged-out session.
    pub fn logout(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USERNAME_KEY)?;

        let mut session = self.session.write().expect("session lock poisoned");
        *session = Session::default();
        debug!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::open(SessionStorage::with_dir(dir.path())).unwrap()
    }

    #[test]
    fn test_fresh_store_is_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.current(), Session::default());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_login_publishes_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.login("tok123", "alice").unwrap();

        let session = store.current();
        assert_eq!(session.token.as_deref(), Some("tok123"));
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert!(session.is_authenticated);

        // Both keys are on disk.
        assert!(dir.path().join("scrob_token").exists());
        assert!(dir.path().join("scrob_username").exists());
    }

    #[test]
    fn test_logout_clears_and_removes_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.login("tok123", "alice").unwrap();
        store.logout().unwrap();

        assert_eq!(store.current(), Session::default());
        assert!(!dir.path().join("scrob_token").exists());
        assert!(!dir.path().join("scrob_username").exists());
    }

    #[test]
    fn test_reopen_restores_session() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).login("tok123", "alice").unwrap();

        let store = store_in(&dir);
        let session = store.current();
        assert!(session.is_authenticated);
        assert_eq!(session.token.as_deref(), Some("tok123"));
        assert_eq!(session.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_login_replaces_previous_session() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.login("tok1", "alice").unwrap();
        store.login("tok2", "bob").unwrap();

        let session = store.current();
        assert_eq!(session.token.as_deref(), Some("tok2"));
        assert_eq!(session.username.as_deref(), Some("bob"));
    }
}
