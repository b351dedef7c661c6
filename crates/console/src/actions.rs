//! Mutating tenant actions
//!
//! Executes exactly one mutating operation per invocation and restores
//! consistency afterward: a confirmed mutation triggers one directory
//! refresh and one statistics re-fetch. Actions are serialized per tenant
//! id; a second action for a tenant with one already in flight is rejected
//! locally with `Busy` and never reaches the network. Nothing is committed
//! speculatively: displayed state changes only after server confirmation.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use tc_core::tenant::{Plan, TenantUpdate};
use tc_core::{Error, Result};

use crate::directory::QueryCoordinator;
use crate::gateway::AdminApi;
use crate::guard::{SessionGuard, SESSION_ENDED};

const MAX_TRIAL_EXTENSION_DAYS: u32 = 365;

/// One mutating operation against a single tenant
#[derive(Debug, Clone)]
pub enum TenantAction {
    ExtendTrial { days: u32 },
    Suspend { reason: String },
    Activate { plan: Plan },
    Update(TenantUpdate),
}

impl TenantAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExtendTrial { .. } => "extend",
            Self::Suspend { .. } => "suspend",
            Self::Activate { .. } => "activate",
            Self::Update(_) => "update",
        }
    }

    /// Local pre-submission constraints. Failures block dispatch entirely.
    fn validate(&self) -> Result<()> {
        match self {
            Self::ExtendTrial { days } => {
                if *days == 0 || *days > MAX_TRIAL_EXTENSION_DAYS {
                    return Err(Error::validation(format!(
                        "Trial extension must be between 1 and {} days",
                        MAX_TRIAL_EXTENSION_DAYS
                    )));
                }
            }
            Self::Suspend { reason } => {
                if reason.trim().is_empty() {
                    return Err(Error::validation("Suspension requires a reason"));
                }
            }
            // The plan enum is typed; any value it holds is a known plan
            Self::Activate { .. } => {}
            Self::Update(update) => {
                if update.is_empty() {
                    return Err(Error::validation("Update must change at least one field"));
                }
                if update.max_users == Some(0) {
                    return Err(Error::validation("maxUsers must be positive"));
                }
                if update.max_camps == Some(0) {
                    return Err(Error::validation("maxCamps must be positive"));
                }
            }
        }
        Ok(())
    }
}

/// Executes mutating tenant operations
#[derive(Clone)]
pub struct ActionOrchestrator {
    api: Arc<dyn AdminApi>,
    guard: SessionGuard,
    coordinator: QueryCoordinator,
    /// Tenant ids with a mutation currently in flight
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

impl ActionOrchestrator {
    pub fn new(
        api: Arc<dyn AdminApi>,
        guard: SessionGuard,
        coordinator: QueryCoordinator,
    ) -> Self {
        Self {
            api,
            guard,
            coordinator,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether a mutation is currently in flight for this tenant.
    pub async fn is_in_flight(&self, tenant_id: Uuid) -> bool {
        self.in_flight.lock().await.contains(&tenant_id)
    }

    /// Execute one mutating action. On success, the directory and the
    /// statistics are each re-fetched exactly once, with the query current
    /// at the time the action resolved.
    pub async fn execute(&self, tenant_id: Uuid, action: TenantAction) -> Result<()> {
        action.validate()?;

        {
            let mut in_flight = self.in_flight.lock().await;
            if !in_flight.insert(tenant_id) {
                return Err(Error::Busy(tenant_id));
            }
        }

        info!(%tenant_id, kind = action.kind(), "Dispatching tenant action");
        let result = self
            .guard
            .intercept(self.send(tenant_id, &action).await)
            .await;
        self.in_flight.lock().await.remove(&tenant_id);

        match result {
            Ok(()) => {
                // Independent requests; both triggered exactly once
                tokio::join!(
                    self.coordinator.refresh(),
                    self.coordinator.refresh_statistics()
                );
                Ok(())
            }
            // The guard has already torn the session down; hand the
            // caller a neutral failure, not something to render inline
            Err(e) if e.is_auth_invalid() => Err(Error::request_failed(None, SESSION_ENDED)),
            Err(e) => {
                warn!(%tenant_id, kind = action.kind(), "Tenant action failed: {}", e);
                Err(e)
            }
        }
    }

    async fn send(&self, tenant_id: Uuid, action: &TenantAction) -> Result<()> {
        match action {
            TenantAction::ExtendTrial { days } => self.api.extend_trial(tenant_id, *days).await,
            TenantAction::Suspend { reason } => self.api.suspend(tenant_id, reason).await,
            TenantAction::Activate { plan } => self.api.activate(tenant_id, *plan).await,
            TenantAction::Update(update) => self.api.update_tenant(tenant_id, update).await,
        }
    }
}
