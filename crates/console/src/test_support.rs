//! Shared test doubles
//!
//! A programmable [`AdminApi`] implementation: every call is recorded, and
//! per-call results and latencies can be queued ahead of time to script
//! failures and out-of-order responses. Queues empty means a benign default
//! response.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use tc_core::tenant::{
    Plan, Statistics, TenantDetail, TenantPage, TenantQuery, TenantStatus, TenantSummary,
    TenantUpdate,
};
use tc_core::Result;

use crate::actions::ActionOrchestrator;
use crate::detail::DetailView;
use crate::directory::{DirectoryState, QueryCoordinator};
use crate::gateway::{AdminApi, AdminProfile, LoginResponse};
use crate::guard::SessionGuard;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Login(String),
    ListTenants(TenantQuery),
    FetchStatistics,
    FetchTenant(Uuid),
    ExtendTrial(Uuid, u32),
    Suspend(Uuid, String),
    Activate(Uuid, Plan),
    UpdateTenant(Uuid),
}

#[derive(Default)]
pub struct MockApi {
    pub calls: Mutex<Vec<RecordedCall>>,
    login_results: Mutex<VecDeque<Result<LoginResponse>>>,
    list_results: Mutex<VecDeque<Result<TenantPage>>>,
    list_delays: Mutex<VecDeque<Duration>>,
    stats_results: Mutex<VecDeque<Result<Statistics>>>,
    detail_results: Mutex<VecDeque<Result<TenantDetail>>>,
    action_results: Mutex<VecDeque<Result<()>>>,
    action_delays: Mutex<VecDeque<Duration>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_login(&self, result: Result<LoginResponse>) {
        self.login_results.lock().await.push_back(result);
    }

    /// Queue the result (and optional latency) of the next directory query.
    pub async fn push_list(&self, result: Result<TenantPage>, delay: Option<Duration>) {
        self.list_results.lock().await.push_back(result);
        self.list_delays
            .lock()
            .await
            .push_back(delay.unwrap_or(Duration::ZERO));
    }

    pub async fn push_stats(&self, result: Result<Statistics>) {
        self.stats_results.lock().await.push_back(result);
    }

    pub async fn push_detail(&self, result: Result<TenantDetail>) {
        self.detail_results.lock().await.push_back(result);
    }

    /// Queue the result (and optional latency) of the next mutating action.
    pub async fn push_action(&self, result: Result<()>, delay: Option<Duration>) {
        self.action_results.lock().await.push_back(result);
        self.action_delays
            .lock()
            .await
            .push_back(delay.unwrap_or(Duration::ZERO));
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl AdminApi for MockApi {
    async fn login(&self, username: &str, _password: &str) -> Result<LoginResponse> {
        self.record(RecordedCall::Login(username.to_string())).await;
        match self.login_results.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(LoginResponse {
                token: "tok-mock".to_string(),
                admin: AdminProfile {
                    id: Uuid::new_v4(),
                    username: username.to_string(),
                    email: None,
                },
            }),
        }
    }

    async fn list_tenants(&self, query: &TenantQuery) -> Result<TenantPage> {
        self.record(RecordedCall::ListTenants(query.clone())).await;
        let delay = self.list_delays.lock().await.pop_front();
        let result = self.list_results.lock().await.pop_front();
        if let Some(delay) = delay {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        match result {
            Some(result) => result,
            None => Ok(TenantPage {
                tenants: Vec::new(),
                page: query.page,
                pages: 1,
                total: 0,
            }),
        }
    }

    async fn fetch_statistics(&self) -> Result<Statistics> {
        self.record(RecordedCall::FetchStatistics).await;
        match self.stats_results.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(Statistics::default()),
        }
    }

    async fn fetch_tenant(&self, tenant_id: Uuid) -> Result<TenantDetail> {
        self.record(RecordedCall::FetchTenant(tenant_id)).await;
        match self.detail_results.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(detail_for(tenant_id, "Default Lodge")),
        }
    }

    async fn extend_trial(&self, tenant_id: Uuid, days: u32) -> Result<()> {
        self.record(RecordedCall::ExtendTrial(tenant_id, days)).await;
        self.pop_action().await
    }

    async fn suspend(&self, tenant_id: Uuid, reason: &str) -> Result<()> {
        self.record(RecordedCall::Suspend(tenant_id, reason.to_string()))
            .await;
        self.pop_action().await
    }

    async fn activate(&self, tenant_id: Uuid, plan: Plan) -> Result<()> {
        self.record(RecordedCall::Activate(tenant_id, plan)).await;
        self.pop_action().await
    }

    async fn update_tenant(&self, tenant_id: Uuid, _update: &TenantUpdate) -> Result<()> {
        self.record(RecordedCall::UpdateTenant(tenant_id)).await;
        self.pop_action().await
    }
}

impl MockApi {
    async fn pop_action(&self) -> Result<()> {
        let delay = self.action_delays.lock().await.pop_front();
        let result = self.action_results.lock().await.pop_front();
        if let Some(delay) = delay {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        result.unwrap_or(Ok(()))
    }
}

/// A directory page of named tenants.
pub fn page_with(names: &[&str], page: u32, pages: u32) -> TenantPage {
    TenantPage {
        tenants: names.iter().map(|name| summary(name)).collect(),
        page,
        pages,
        total: names.len() as u64,
    }
}

pub fn summary(company_name: &str) -> TenantSummary {
    TenantSummary {
        id: Uuid::new_v4(),
        company_name: company_name.to_string(),
        email: format!(
            "ops@{}.example",
            company_name.to_lowercase().replace(' ', "-")
        ),
        status: TenantStatus::Trial,
        plan: Plan::Standard,
        user_count: 5,
        created_at: Utc::now(),
        expiry_date: None,
    }
}

pub fn detail_for(tenant_id: Uuid, company_name: &str) -> TenantDetail {
    TenantDetail {
        id: tenant_id,
        company_name: company_name.to_string(),
        email: format!(
            "ops@{}.example",
            company_name.to_lowercase().replace(' ', "-")
        ),
        status: TenantStatus::Trial,
        plan: Plan::Standard,
        user_count: 5,
        created_at: Utc::now(),
        expiry_date: None,
        phone: None,
        country: Some("CA".to_string()),
        max_users: 25,
        max_camps: 3,
        admin_notes: None,
        modules: vec!["bookings".to_string()],
        users: Vec::new(),
        camps: Vec::new(),
    }
}

/// Everything a test needs: a scripted API wired through guard,
/// coordinator, orchestrator, and directory, with a live credential.
pub struct Harness {
    pub api: Arc<MockApi>,
    pub guard: SessionGuard,
    pub directory: DirectoryState,
    pub coordinator: QueryCoordinator,
    pub actions: ActionOrchestrator,
    _dir: tempfile::TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = tc_core::session::SessionStore::new(dir.path().to_path_buf())
            .await
            .unwrap();
        store.set_credential("tok-mock".to_string()).await.unwrap();

        let api = Arc::new(MockApi::new());
        let directory = DirectoryState::new();
        let guard = SessionGuard::new(store, directory.clone()).await;
        let coordinator = QueryCoordinator::new(api.clone(), guard.clone(), directory.clone());
        let actions = ActionOrchestrator::new(api.clone(), guard.clone(), coordinator.clone());

        Self {
            api,
            guard,
            directory,
            coordinator,
            actions,
            _dir: dir,
        }
    }

    pub fn detail(&self, tenant_id: Uuid) -> DetailView {
        DetailView::new(
            self.api.clone(),
            self.guard.clone(),
            self.actions.clone(),
            tenant_id,
        )
    }
}
