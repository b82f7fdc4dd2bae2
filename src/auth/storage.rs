use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory name under the platform config dir for persisted session state.
const APP_DIR: &str = "scrob";

/// Persisted key for the bearer token.
pub(crate) const TOKEN_KEY: &str = "scrob_token";

/// Persisted key for the username.
pub(crate) const USERNAME_KEY: &str = "scrob_username";

/// File-backed key-value storage for session state.
///
/// Each key is one file inside the storage directory, so writes and removals
/// are independent per key. Only the two session keys are ever stored.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    /// Storage rooted at the platform config directory (`<config>/scrob`).
    pub fn new() -> Result<Self> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(Self {
            dir: config_dir.join(APP_DIR),
        })
    }

    /// Storage rooted at an explicit directory. Used by tests and embedders.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.dir.join(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stored value {key}"))?;
        Ok(Some(value))
    }

    pub(crate) fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create storage directory")?;
        std::fs::write(self.dir.join(key), value)
            .with_context(|| format!("Failed to persist value {key}"))?;
        Ok(())
    }

    /// Remove a key. Removing an absent key is not an error.
    pub(crate) fn remove(&self, key: &str) -> Result<()> {
        let path = self.dir.join(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stored value {key}"))?;
        }
        Ok(())
    }
}
