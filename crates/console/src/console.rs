//! Top-level console wiring
//!
//! Assembles the session store, gateway client, guard, directory state,
//! coordinator, and orchestrator into one handle the operator UI drives.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use tc_core::session::SessionStore;
use tc_core::Result;

use crate::actions::ActionOrchestrator;
use crate::detail::DetailView;
use crate::directory::{DirectoryState, QueryCoordinator};
use crate::gateway::{AdminApi, AdminProfile, ApiClient};
use crate::guard::SessionGuard;

/// The assembled admin console core
pub struct AdminConsole {
    api: Arc<dyn AdminApi>,
    session: SessionStore,
    guard: SessionGuard,
    directory: DirectoryState,
    coordinator: QueryCoordinator,
    actions: ActionOrchestrator,
}

impl AdminConsole {
    /// Connect to an API at `base_url`, restoring any credential persisted
    /// under `state_dir` from a previous session.
    pub async fn connect(base_url: impl Into<String>, state_dir: PathBuf) -> Result<Self> {
        let session = SessionStore::new(state_dir).await?;
        let api: Arc<dyn AdminApi> = Arc::new(ApiClient::new(base_url, session.clone()));
        Ok(Self::assemble(api, session).await)
    }

    /// Assemble the console around an existing API implementation.
    pub async fn with_api(api: Arc<dyn AdminApi>, session: SessionStore) -> Self {
        Self::assemble(api, session).await
    }

    async fn assemble(api: Arc<dyn AdminApi>, session: SessionStore) -> Self {
        let directory = DirectoryState::new();
        let guard = SessionGuard::new(session.clone(), directory.clone()).await;
        let coordinator =
            QueryCoordinator::new(Arc::clone(&api), guard.clone(), directory.clone());
        let actions =
            ActionOrchestrator::new(Arc::clone(&api), guard.clone(), coordinator.clone());

        Self {
            api,
            session,
            guard,
            directory,
            coordinator,
            actions,
        }
    }

    /// Log in, persist the returned credential, and prime the directory
    /// and statistics.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminProfile> {
        let response = self.api.login(username, password).await?;
        self.session.set_credential(response.token).await?;
        self.guard.mark_authenticated();
        info!(username, "Admin session established");

        tokio::join!(
            self.coordinator.refresh(),
            self.coordinator.refresh_statistics()
        );
        Ok(response.admin)
    }

    /// End the session and discard all directory state.
    pub async fn logout(&self) {
        self.guard.force_logout().await;
    }

    pub fn is_authenticated(&self) -> bool {
        self.guard.is_authenticated()
    }

    /// Watch authentication state transitions (login, logout, forced
    /// logout on an authentication-invalid response).
    pub fn auth_changes(&self) -> watch::Receiver<bool> {
        self.guard.subscribe()
    }

    pub fn coordinator(&self) -> &QueryCoordinator {
        &self.coordinator
    }

    pub fn directory(&self) -> &DirectoryState {
        &self.directory
    }

    pub fn actions(&self) -> &ActionOrchestrator {
        &self.actions
    }

    /// Open a detail view for one tenant.
    pub fn detail(&self, tenant_id: Uuid) -> DetailView {
        DetailView::new(
            Arc::clone(&self.api),
            self.guard.clone(),
            self.actions.clone(),
            tenant_id,
        )
    }
}
