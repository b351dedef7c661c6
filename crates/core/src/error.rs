//! Error types for the console core

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    /// Credential missing, expired, or rejected. Terminal for the session;
    /// always routed through the session guard, never shown inline.
    #[error("Authentication invalid: {0}")]
    AuthInvalid(String),

    /// Payload failed local pre-submission constraints. Blocks dispatch.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Network failure or server-reported error other than auth.
    /// `status` is absent when the request never reached the server.
    #[error("Request failed: {message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    /// A conflicting mutating action is already in flight for this tenant.
    #[error("Action already in flight for tenant: {0}")]
    Busy(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a RequestFailed error for a server-reported status.
    pub fn request_failed(status: impl Into<Option<u16>>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error must trigger the session guard.
    pub fn is_auth_invalid(&self) -> bool {
        matches!(self, Self::AuthInvalid(_))
    }
}
