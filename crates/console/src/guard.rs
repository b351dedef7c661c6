//! Session guard
//!
//! Wraps every gateway result. An authentication-invalid response clears
//! the stored credential, discards directory state, and broadcasts the
//! unauthenticated state, unconditionally and ahead of any pending UI
//! action. Authentication failures are terminal for the session; no retry.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use tc_core::session::SessionStore;
use tc_core::Result;

use crate::directory::DirectoryState;

/// Message handed to callers whose operation was cut short by a forced
/// logout. Neutral on purpose: the real signal travels over the auth
/// channel, not through the returned error.
pub(crate) const SESSION_ENDED: &str = "Session ended; sign in again";

/// Intercepts authentication-invalid responses from the gateway
#[derive(Clone)]
pub struct SessionGuard {
    store: SessionStore,
    directory: DirectoryState,
    auth_tx: Arc<watch::Sender<bool>>,
}

impl SessionGuard {
    pub async fn new(store: SessionStore, directory: DirectoryState) -> Self {
        let authenticated = store.has_credential().await;
        let (auth_tx, _) = watch::channel(authenticated);
        Self {
            store,
            directory,
            auth_tx: Arc::new(auth_tx),
        }
    }

    /// Watch authentication state transitions.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.auth_tx.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.auth_tx.borrow()
    }

    /// Mark the session live after a successful login.
    pub fn mark_authenticated(&self) {
        self.auth_tx.send_replace(true);
    }

    /// Tear the session down: drop the credential, discard directory state,
    /// broadcast unauthenticated.
    pub async fn force_logout(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear stored credential: {}", e);
        }
        self.directory.reset().await;
        self.auth_tx.send_replace(false);
    }

    /// Fault-check a gateway result. Authentication-invalid errors tear the
    /// session down before being returned; everything else passes through
    /// untouched.
    pub async fn intercept<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_auth_invalid() {
                info!("Authentication invalid, forcing logout: {}", e);
                self.force_logout().await;
            }
        }
        result
    }
}
