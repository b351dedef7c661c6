use serde::{Deserialize, Serialize};

use super::model::TenantSummary;

/// Status filter applied to the tenant directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Trial,
    Suspended,
    Expired,
}

impl StatusFilter {
    /// Query-parameter value, or None for the unfiltered directory.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Active => Some("active"),
            Self::Trial => Some("trial"),
            Self::Suspended => Some("suspended"),
            Self::Expired => Some("expired"),
        }
    }
}

/// The current directory query: search text, status filter, page number.
/// Mutated only by the coordinator's explicit setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantQuery {
    pub search: String,
    pub status: StatusFilter,
    pub page: u32,
}

impl Default for TenantQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            page: 1,
        }
    }
}

/// One page of the tenant directory as returned by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantPage {
    pub tenants: Vec<TenantSummary>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

impl TenantPage {
    pub fn empty() -> Self {
        Self {
            tenants: Vec::new(),
            page: 1,
            pages: 0,
            total: 0,
        }
    }
}
