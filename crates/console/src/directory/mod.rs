//! Directory state and query coordination
//!
//! [`DirectoryState`] holds the last committed tenant page plus statistics;
//! [`QueryCoordinator`] turns raw operator input into a minimal, ordered
//! stream of directory queries with debounced search and stale-drop commits.

pub mod coordinator;
pub mod state;

pub use coordinator::QueryCoordinator;
pub use state::{DirectorySnapshot, DirectoryState, PageInfo};
