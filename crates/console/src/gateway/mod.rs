//! API gateway surface
//!
//! Defines the typed interface the console uses to talk to the admin API.
//! [`client::ApiClient`] is the HTTP implementation; tests substitute their
//! own implementation of [`AdminApi`].

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tc_core::tenant::{Plan, Statistics, TenantDetail, TenantPage, TenantQuery, TenantUpdate};
use tc_core::Result;

pub use client::ApiClient;

/// Profile of the authenticated admin, as returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

/// Typed interface to the admin API. Every request goes through one
/// implementation of this trait; the HTTP client attaches the session
/// credential and classifies failures.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Exchange operator credentials for a session token
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse>;

    /// One page of the tenant directory for the given query
    async fn list_tenants(&self, query: &TenantQuery) -> Result<TenantPage>;

    /// Aggregate directory statistics
    async fn fetch_statistics(&self) -> Result<Statistics>;

    /// Full record for a single tenant
    async fn fetch_tenant(&self, tenant_id: Uuid) -> Result<TenantDetail>;

    /// Extend a tenant's trial by the given number of days
    async fn extend_trial(&self, tenant_id: Uuid, days: u32) -> Result<()>;

    /// Suspend a tenant with a reason
    async fn suspend(&self, tenant_id: Uuid, reason: &str) -> Result<()>;

    /// Activate a tenant onto a plan
    async fn activate(&self, tenant_id: Uuid, plan: Plan) -> Result<()>;

    /// Apply a partial update to a tenant record
    async fn update_tenant(&self, tenant_id: Uuid, update: &TenantUpdate) -> Result<()>;
}
