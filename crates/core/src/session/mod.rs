//! Session credential storage
//!
//! Owns the lifecycle of the single opaque admin credential. Every other
//! component reads the credential through [`SessionStore`]; nothing else
//! touches the persisted value.

pub mod store;

pub use store::SessionStore;
