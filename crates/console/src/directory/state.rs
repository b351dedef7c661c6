//! Reconciled tenant directory state
//!
//! The single place the committed tenant list, pagination metadata, and
//! aggregate statistics live. Commits carry the dispatch sequence number;
//! a commit with a lower sequence than the current one is rejected, so the
//! displayed list can never move backwards even if the coordinator's own
//! ordering check is bypassed.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use tc_core::tenant::{Statistics, TenantPage, TenantSummary};

/// Pagination metadata for the committed page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

#[derive(Debug, Default, Clone)]
struct DirectoryInner {
    sequence: u64,
    tenants: Vec<TenantSummary>,
    page_info: Option<PageInfo>,
    statistics: Option<Statistics>,
    error: Option<String>,
}

/// Owned copy of the directory state for display
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    pub sequence: u64,
    pub tenants: Vec<TenantSummary>,
    pub page_info: Option<PageInfo>,
    pub statistics: Option<Statistics>,
    pub error: Option<String>,
}

/// Thread-safe directory state
#[derive(Clone, Default)]
pub struct DirectoryState {
    inner: Arc<RwLock<DirectoryInner>>,
}

impl DirectoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a query result. Returns false (and changes nothing) when the
    /// result carries a lower sequence than the current commit.
    pub async fn commit(&self, sequence: u64, page: TenantPage) -> bool {
        let mut inner = self.inner.write().await;
        if sequence < inner.sequence {
            warn!(
                sequence,
                current = inner.sequence,
                "Rejected out-of-order directory commit"
            );
            return false;
        }
        inner.sequence = sequence;
        inner.page_info = Some(PageInfo {
            page: page.page,
            total_pages: page.pages,
            total_count: page.total,
        });
        inner.tenants = page.tenants;
        inner.error = None;
        true
    }

    /// Replace the aggregate statistics.
    pub async fn commit_statistics(&self, statistics: Statistics) {
        self.inner.write().await.statistics = Some(statistics);
    }

    /// Attach a query error, leaving the previously committed list visible.
    pub async fn set_error(&self, message: String) {
        self.inner.write().await.error = Some(message);
    }

    /// Discard everything (logout, authentication-invalid).
    pub async fn reset(&self) {
        *self.inner.write().await = DirectoryInner::default();
    }

    /// Sequence of the committed page (0 before the first commit).
    pub async fn sequence(&self) -> u64 {
        self.inner.read().await.sequence
    }

    pub async fn snapshot(&self) -> DirectorySnapshot {
        let inner = self.inner.read().await;
        DirectorySnapshot {
            sequence: inner.sequence,
            tenants: inner.tenants.clone(),
            page_info: inner.page_info,
            statistics: inner.statistics.clone(),
            error: inner.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::page_with;

    #[tokio::test]
    async fn test_commit_replaces_list() {
        let state = DirectoryState::new();
        assert!(state.commit(1, page_with(&["Alpha Lodge"], 1, 1)).await);
        assert!(state.commit(2, page_with(&["Bravo Lodge"], 1, 1)).await);

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.sequence, 2);
        assert_eq!(snapshot.tenants.len(), 1);
        assert_eq!(snapshot.tenants[0].company_name, "Bravo Lodge");
    }

    #[tokio::test]
    async fn test_rejects_lower_sequence() {
        let state = DirectoryState::new();
        assert!(state.commit(2, page_with(&["Bravo Lodge"], 1, 1)).await);
        assert!(!state.commit(1, page_with(&["Alpha Lodge"], 1, 1)).await);

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.sequence, 2);
        assert_eq!(snapshot.tenants[0].company_name, "Bravo Lodge");
    }

    #[tokio::test]
    async fn test_error_preserves_list() {
        let state = DirectoryState::new();
        state.commit(1, page_with(&["Alpha Lodge"], 1, 1)).await;
        state.set_error("server unavailable".to_string()).await;

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.error.as_deref(), Some("server unavailable"));
        assert_eq!(snapshot.tenants.len(), 1);

        // A successful commit clears the error again
        state.commit(2, page_with(&["Alpha Lodge"], 1, 1)).await;
        assert!(state.snapshot().await.error.is_none());
    }

    #[tokio::test]
    async fn test_reset_discards_everything() {
        let state = DirectoryState::new();
        state.commit(3, page_with(&["Alpha Lodge"], 1, 1)).await;
        state.commit_statistics(Statistics::default()).await;
        state.reset().await;

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.sequence, 0);
        assert!(snapshot.tenants.is_empty());
        assert!(snapshot.statistics.is_none());
        assert!(snapshot.page_info.is_none());
    }
}
