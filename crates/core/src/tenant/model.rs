use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a tenant account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Trial,
    Suspended,
    Expired,
}

impl TenantStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trial => "trial",
            Self::Suspended => "suspended",
            Self::Expired => "expired",
        }
    }
}

/// Subscription plan of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Standard,
    Premium,
    Enterprise,
}

impl Plan {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }
}

/// One row of the tenant directory. Immutable snapshot; replaced wholesale
/// on each committed query result, never patched field-by-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummary {
    pub id: Uuid,
    pub company_name: String,
    pub email: String,
    pub status: TenantStatus,
    pub plan: Plan,
    pub user_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
}

/// A user account belonging to a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A camp (site) operated by a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Full tenant record, fetched lazily per tenant for the detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDetail {
    pub id: Uuid,
    pub company_name: String,
    pub email: String,
    pub status: TenantStatus,
    pub plan: Plan,
    pub user_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub max_users: u32,
    pub max_camps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub users: Vec<TenantUser>,
    #[serde(default)]
    pub camps: Vec<CampSummary>,
}

impl TenantDetail {
    /// Project the detail down to the directory row shape.
    pub fn summary(&self) -> TenantSummary {
        TenantSummary {
            id: self.id,
            company_name: self.company_name.clone(),
            email: self.email.clone(),
            status: self.status,
            plan: self.plan,
            user_count: self.user_count,
            created_at: self.created_at,
            expiry_date: self.expiry_date,
        }
    }
}

/// Aggregate directory statistics. Always re-fetched together with the
/// tenant list after a mutating action so the two never diverge for more
/// than one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_tenants: u64,
    pub active: u64,
    pub trial: u64,
    pub suspended: u64,
    pub expiring_soon: u64,
}

/// Partial record submitted by the `update` action. Absent fields are left
/// untouched by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_users: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_camps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
}

impl TenantUpdate {
    pub fn is_empty(&self) -> bool {
        self.max_users.is_none()
            && self.max_camps.is_none()
            && self.plan.is_none()
            && self.notes.is_none()
            && self.modules.is_none()
    }
}
