//! Tenant Console - admin client core for a multi-tenant directory API
//!
//! This crate orchestrates the operator-facing side of tenant
//! administration:
//! - Gateway client attaching the bearer credential to every request
//! - Session guard that forces logout on authentication-invalid responses
//! - Query coordinator with debounced search and sequence-stamped dispatch
//! - Directory state with stale-drop commits
//! - Action orchestrator serializing mutations per tenant
//! - Lazy per-tenant detail views with staged edits

pub mod actions;
pub mod console;
pub mod detail;
pub mod directory;
pub mod gateway;
pub mod guard;

#[cfg(test)]
pub(crate) mod test_support;

pub use actions::{ActionOrchestrator, TenantAction};
pub use console::AdminConsole;
pub use detail::DetailView;
pub use directory::{DirectorySnapshot, DirectoryState, PageInfo, QueryCoordinator};
pub use gateway::{AdminApi, AdminProfile, ApiClient, LoginResponse};
pub use guard::SessionGuard;

pub use tc_core::{Error, Result};
