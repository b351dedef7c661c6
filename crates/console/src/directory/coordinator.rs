//! Query coordination
//!
//! Turns raw operator input into directory requests. Search edits are
//! debounced; filter and page changes dispatch immediately. Every dispatch
//! is stamped with the next sequence number, and a response is committed
//! only while its stamp is still the highest dispatched, so a slow early
//! request can never overwrite a fast later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use tc_core::tenant::{StatusFilter, TenantQuery};
use tc_core::{Error, Result};

use crate::gateway::AdminApi;
use crate::guard::SessionGuard;

use super::state::DirectoryState;

/// Quiet period after the last keystroke before a search dispatches
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coordinates the current directory query
#[derive(Clone)]
pub struct QueryCoordinator {
    api: Arc<dyn AdminApi>,
    guard: SessionGuard,
    directory: DirectoryState,
    query: Arc<RwLock<TenantQuery>>,
    /// Highest dispatched sequence; responses are committed only while
    /// their stamp still equals this value.
    sequence: Arc<AtomicU64>,
    /// Bumped on every search edit; a debounce task only dispatches if its
    /// epoch is still current when the quiet period elapses.
    search_epoch: Arc<AtomicU64>,
    debounce: Duration,
}

impl QueryCoordinator {
    pub fn new(api: Arc<dyn AdminApi>, guard: SessionGuard, directory: DirectoryState) -> Self {
        Self {
            api,
            guard,
            directory,
            query: Arc::new(RwLock::new(TenantQuery::default())),
            sequence: Arc::new(AtomicU64::new(0)),
            search_epoch: Arc::new(AtomicU64::new(0)),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Override the debounce quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Snapshot of the current query tuple.
    pub async fn query(&self) -> TenantQuery {
        self.query.read().await.clone()
    }

    /// Record a search edit. The dispatch is debounced: only the text
    /// present when the quiet period elapses produces a request.
    pub async fn set_search(&self, text: impl Into<String>) {
        {
            let mut query = self.query.write().await;
            query.search = text.into();
            // New search text invalidates the old page numbering
            query.page = 1;
        }
        let epoch = self.search_epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let coordinator = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(coordinator.debounce).await;
            if coordinator.search_epoch.load(Ordering::SeqCst) == epoch {
                coordinator.dispatch().await;
            }
        });
    }

    /// Change the status filter. Resets the page to 1 and dispatches
    /// immediately.
    pub async fn set_status_filter(&self, status: StatusFilter) {
        {
            let mut query = self.query.write().await;
            query.status = status;
            query.page = 1;
        }
        self.dispatch().await;
    }

    /// Move to another page of the current query. Dispatches immediately.
    pub async fn set_page(&self, page: u32) -> Result<()> {
        if page == 0 {
            return Err(Error::validation("Page number must be positive"));
        }
        self.query.write().await.page = page;
        self.dispatch().await;
        Ok(())
    }

    /// Re-dispatch the current query. Used as the retry affordance after a
    /// failure and by the action orchestrator after a confirmed mutation.
    pub async fn refresh(&self) {
        self.dispatch().await;
    }

    /// Re-fetch the aggregate statistics.
    pub async fn refresh_statistics(&self) {
        let result = self.guard.intercept(self.api.fetch_statistics().await).await;
        match result {
            Ok(statistics) => self.directory.commit_statistics(statistics).await,
            Err(e) if e.is_auth_invalid() => {}
            Err(e) => warn!("Statistics fetch failed: {}", e),
        }
    }

    async fn dispatch(&self) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let query = self.query.read().await.clone();
        debug!(sequence, page = query.page, "Dispatching directory query");

        let result = self.guard.intercept(self.api.list_tenants(&query).await).await;
        match result {
            Ok(page) => {
                if self.sequence.load(Ordering::SeqCst) != sequence {
                    debug!(sequence, "Dropping superseded directory response");
                    return;
                }
                self.directory.commit(sequence, page).await;
            }
            // Already handled by the guard; the session is gone
            Err(e) if e.is_auth_invalid() => {}
            Err(e) => {
                if self.sequence.load(Ordering::SeqCst) != sequence {
                    debug!(sequence, "Dropping superseded directory failure: {}", e);
                    return;
                }
                warn!(sequence, "Directory query failed: {}", e);
                self.directory.set_error(e.to_string()).await;
            }
        }
    }
}
