//! Durable credential store backed by a single JSON document.
//!
//! Token and cached profile live in one file and are written and cleared
//! together, so they can never drift apart the way separate storage keys can.

use crate::atomic_json::AtomicJsonFile;
use crate::paths::CropmatePaths;
use cropmate_core::error::{CropmateError, Result};
use cropmate_core::session::{CredentialStore, Session};
use cropmate_core::user::UserAccount;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk shape of `credentials.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredentials {
    token: String,
    user: UserAccount,
}

/// File-backed [`CredentialStore`] shared by every client instance.
pub struct FileCredentialStore {
    file: AtomicJsonFile<StoredCredentials>,
}

impl FileCredentialStore {
    /// Creates a store at the default credentials path.
    pub fn new() -> Result<Self> {
        let path = CropmatePaths::credentials_file()
            .map_err(|e| CropmateError::storage(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store at an explicit path. Used by tests and by instances
    /// pointed at a shared location.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            // User read/write only on Unix, from creation on.
            file: AtomicJsonFile::with_mode(path, 0o600),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, token: &str, user: &UserAccount) -> Result<()> {
        let credentials = StoredCredentials {
            token: token.to_string(),
            user: user.clone(),
        };
        self.file
            .save(&credentials)
            .map_err(|e| CropmateError::storage(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        self.file
            .remove()
            .map_err(|e| CropmateError::storage(e.to_string()))
    }

    fn read(&self) -> Session {
        match self.file.load() {
            Ok(Some(credentials)) => {
                Session::authenticated(credentials.token, credentials.user)
            }
            Ok(None) => Session::absent(),
            Err(e) => {
                // Unreadable storage means "no session", never an error.
                tracing::warn!(
                    target: "credentials",
                    "Failed to read credential store, treating as logged out: {}",
                    e
                );
                Session::absent()
            }
        }
    }
}
