//! Persistent store for the admin session credential
//!
//! Holds at most one opaque bearer token, persisted as a small JSON file so
//! a session survives process restarts. Single-writer: only login, logout,
//! and the session guard mutate the credential.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Error;
use crate::Result;

const CREDENTIAL_FILE: &str = "credential.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
}

/// Thread-safe credential store with file persistence
#[derive(Clone)]
pub struct SessionStore {
    credential: Arc<RwLock<Option<String>>>,
    file_path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `base_dir`, restoring any persisted
    /// credential from a previous session.
    pub async fn new(base_dir: PathBuf) -> Result<Self> {
        tokio::fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| Error::Storage(format!("Failed to create session directory: {}", e)))?;

        let file_path = base_dir.join(CREDENTIAL_FILE);
        let credential = load_credential(&file_path).await?;
        if credential.is_some() {
            debug!("Restored persisted session credential");
        }

        Ok(Self {
            credential: Arc::new(RwLock::new(credential)),
            file_path,
        })
    }

    /// Current credential, if a session is live.
    pub async fn credential(&self) -> Option<String> {
        self.credential.read().await.clone()
    }

    /// Whether a credential is currently held.
    pub async fn has_credential(&self) -> bool {
        self.credential.read().await.is_some()
    }

    /// Replace the credential and persist it.
    pub async fn set_credential(&self, token: String) -> Result<()> {
        let content = serde_json::to_string_pretty(&StoredCredential {
            token: token.clone(),
        })?;
        tokio::fs::write(&self.file_path, content)
            .await
            .map_err(|e| Error::Storage(format!("Failed to write credential: {}", e)))?;
        *self.credential.write().await = Some(token);
        Ok(())
    }

    /// Drop the credential and remove the persisted value.
    pub async fn clear(&self) -> Result<()> {
        *self.credential.write().await = None;
        match tokio::fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!(
                "Failed to remove credential: {}",
                e
            ))),
        }
    }
}

async fn load_credential(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Storage(format!("Failed to read credential: {}", e)))?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    let stored: StoredCredential = serde_json::from_str(&content)
        .map_err(|e| Error::Storage(format!("Failed to parse credential: {}", e)))?;
    Ok(Some(stored.token))
}
