//! Durable token storage for the CLI session.
//!
//! Implements the client's `TokenStore` over a JSON file in the user's
//! data directory, so the session survives between invocations. The
//! client performs every legal session mutation through this store, so
//! login, refresh, and logout persist automatically.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use directories::ProjectDirs;

use snip_core::error::StorageError;
use snip_core::{AccessToken, RefreshToken, Result, TokenPair, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data: the two token strings under fixed keys.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    access_token: String,
    refresh_token: String,
}

/// File-backed token store.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at the platform's data directory for snip.
    pub fn default_location() -> anyhow::Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "snip").context("Could not determine config directory")?;
        Ok(Self::at(dirs.data_dir().join("session.json")))
    }

    /// Create a store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(|e| StorageError::Access {
            message: e.to_string(),
        })?;

        let stored = serde_json::from_str(&json).map_err(|e| StorageError::Invalid {
            message: e.to_string(),
        })?;

        Ok(Some(stored))
    }

    fn write(&self, stored: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Access {
                message: e.to_string(),
            })?;
        }

        let json = serde_json::to_string_pretty(stored).map_err(|e| StorageError::Invalid {
            message: e.to_string(),
        })?;

        fs::write(&self.path, &json).map_err(|e| StorageError::Access {
            message: e.to_string(),
        })?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let set = fs::metadata(&self.path).and_then(|meta| {
                let mut perms = meta.permissions();
                perms.set_mode(0o600);
                fs::set_permissions(&self.path, perms)
            });
            set.map_err(|e| StorageError::Access {
                message: e.to_string(),
            })?;
        }

        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn tokens(&self) -> Result<Option<TokenPair>> {
        Ok(self.read()?.map(|stored| {
            TokenPair::new(
                AccessToken::new(stored.access_token),
                RefreshToken::new(stored.refresh_token),
            )
        }))
    }

    async fn set_pair(&self, pair: TokenPair) -> Result<()> {
        self.write(&StoredSession {
            access_token: pair.access().as_str().to_string(),
            refresh_token: pair.refresh().as_str().to_string(),
        })
    }

    async fn replace_access(&self, access: AccessToken) -> Result<()> {
        // No stored pair means the session was cleared while a refresh
        // was in flight; do not resurrect it.
        let Some(stored) = self.read()? else {
            return Ok(());
        };

        self.write(&StoredSession {
            access_token: access.as_str().to_string(),
            refresh_token: stored.refresh_token,
        })
    }

    async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| StorageError::Access {
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}
