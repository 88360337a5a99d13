//! Key/value credential storage.
//!
//! The file-backed store keeps tokens across process restarts, writing
//! through a temporary file and renaming it into place so a crash never
//! leaves a half-written file behind.

use crate::{AuthError, AuthResult, write_atomic};

use std::{
    collections::BTreeMap,
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Key holding the access token value.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key holding the access token scheme.
pub const TOKEN_TYPE_KEY: &str = "token_type";
/// Key holding the email of the last resolved profile.
pub const USER_EMAIL_KEY: &str = "user_email";

/// Storage backend for session credentials.
pub trait CredentialStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> AuthResult<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> AuthResult<()>;

    /// Write several values as one update.
    ///
    /// Stores that persist override this so either every value lands or
    /// none does.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> AuthResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: BTreeMap<String, String>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> AuthResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AuthResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AuthResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// TOML file store, loaded once and rewritten on every change.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileCredentialStore {
    /// Open (or lazily create) the store at `path`.
    #[track_caller]
    #[instrument]
    pub fn open(path: impl AsRef<Path> + std::fmt::Debug) -> AuthResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| AuthError::Storage {
                reason: format!("Failed to read credentials: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
            toml::from_str(&contents).map_err(|e| AuthError::Storage {
                reason: format!("Failed to parse credentials: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
        } else {
            BTreeMap::new()
        };

        debug!(path = ?path, keys = entries.len(), "Credential store opened");

        Ok(Self { path, entries })
    }

    /// Open the store in the platform data directory.
    #[track_caller]
    pub fn open_default() -> AuthResult<Self> {
        let proj_dirs = ProjectDirs::from("com", "echocast", "EchoCast").ok_or_else(|| {
            AuthError::Storage {
                reason: "Failed to get data directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Self::open(proj_dirs.data_dir().join("credentials.toml"))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, then adopt them. On failure the in-memory
    /// view keeps its previous contents.
    #[track_caller]
    fn commit(&mut self, entries: BTreeMap<String, String>) -> AuthResult<()> {
        let caller = Location::caller();
        let storage_error = |what: &str, e: &dyn std::fmt::Display| AuthError::Storage {
            reason: format!("{}: {}", what, e),
            location: ErrorLocation::from(caller),
        };

        let contents = toml::to_string(&entries)
            .map_err(|e| storage_error("Failed to serialize credentials", &e))?;

        write_atomic(&self.path, contents.as_bytes())
            .map_err(|e| storage_error("Failed to write credential file", &e))?;

        self.entries = entries;

        debug!(path = ?self.path, keys = self.entries.len(), "Credentials saved (atomic write)");

        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> AuthResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    #[track_caller]
    fn set(&mut self, key: &str, value: &str) -> AuthResult<()> {
        self.set_many(&[(key, value)])
    }

    #[track_caller]
    fn remove(&mut self, key: &str) -> AuthResult<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }

        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next)
    }

    #[track_caller]
    fn set_many(&mut self, entries: &[(&str, &str)]) -> AuthResult<()> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), (*value).to_string());
        }
        self.commit(next)
    }
}
