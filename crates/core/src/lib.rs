//! Core library for Tenant Console
//!
//! This crate contains the shared building blocks of the admin console:
//! - Tenant domain models (summaries, details, statistics, queries)
//! - The error taxonomy used across the console
//! - The session credential store

pub mod error;
pub mod session;
pub mod tenant;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
