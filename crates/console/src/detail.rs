//! Per-tenant detail view
//!
//! A separate read path keyed by tenant id, not folded into the directory
//! state. The view owns the fetched record and discards it when dropped.
//! Edits are staged locally and submitted as a single `update` action; on
//! success the view re-fetches its own record while the orchestrator keeps
//! the directory row consistent.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use tc_core::tenant::{TenantDetail, TenantUpdate};
use tc_core::{Error, Result};

use crate::actions::{ActionOrchestrator, TenantAction};
use crate::gateway::AdminApi;
use crate::guard::{SessionGuard, SESSION_ENDED};

/// Detail view for one tenant
pub struct DetailView {
    api: Arc<dyn AdminApi>,
    guard: SessionGuard,
    actions: ActionOrchestrator,
    tenant_id: Uuid,
    detail: RwLock<Option<TenantDetail>>,
}

impl DetailView {
    pub fn new(
        api: Arc<dyn AdminApi>,
        guard: SessionGuard,
        actions: ActionOrchestrator,
        tenant_id: Uuid,
    ) -> Self {
        Self {
            api,
            guard,
            actions,
            tenant_id,
            detail: RwLock::new(None),
        }
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    /// Fetch the full tenant record.
    pub async fn load(&self) -> Result<TenantDetail> {
        let detail = match self
            .guard
            .intercept(self.api.fetch_tenant(self.tenant_id).await)
            .await
        {
            // Teardown already happened in the guard; return a neutral
            // failure rather than an auth error to render inline
            Err(e) if e.is_auth_invalid() => {
                return Err(Error::request_failed(None, SESSION_ENDED))
            }
            other => other?,
        };
        *self.detail.write().await = Some(detail.clone());
        Ok(detail)
    }

    /// The currently loaded record, if any.
    pub async fn current(&self) -> Option<TenantDetail> {
        self.detail.read().await.clone()
    }

    /// Stage an edit prefilled from the loaded record.
    pub async fn begin_edit(&self) -> Result<TenantUpdate> {
        let detail = self
            .detail
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::validation("Tenant detail not loaded"))?;
        Ok(TenantUpdate {
            max_users: Some(detail.max_users),
            max_camps: Some(detail.max_camps),
            plan: Some(detail.plan),
            notes: detail.admin_notes,
            modules: Some(detail.modules),
        })
    }

    /// Submit staged edits as one `update` action, then re-fetch this
    /// record to reflect the committed values. The orchestrator refreshes
    /// the directory so the summary row stays consistent.
    pub async fn submit_update(&self, update: TenantUpdate) -> Result<TenantDetail> {
        self.actions
            .execute(self.tenant_id, TenantAction::Update(update))
            .await?;
        self.load().await
    }
}
