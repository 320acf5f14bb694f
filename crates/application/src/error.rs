//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error (provider unreachable, bad status, bad payload)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// External service did not answer in time
    #[error("Timed out after {timeout_ms}ms: {operation}")]
    Timeout {
        /// What was being waited for
        operation: String,
        /// The timeout that elapsed
        timeout_ms: u64,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is transient
    ///
    /// The resolver never retries identical requests; the flag only feeds
    /// log levels and reports.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ExternalService(_) | Self::Timeout { .. }
        )
    }
}
