//! Tenant domain types
//!
//! Summaries, details, statistics, and directory query types shared by the
//! gateway client and the console state machinery.

pub mod model;
pub mod query;

pub use model::{
    CampSummary, Plan, Statistics, TenantDetail, TenantStatus, TenantSummary, TenantUpdate,
    TenantUser,
};
pub use query::{StatusFilter, TenantPage, TenantQuery};
