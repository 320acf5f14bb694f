//! Location source port
//!
//! Stream of raw position fixes from the device's positioning subsystem.

use async_trait::async_trait;
use domain::PositionSample;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Errors reported by a location source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user or system denied access to the position
    #[error("Location permission denied")]
    PermissionDenied,

    /// No fix arrived in time
    #[error("Location request timed out")]
    Timeout,

    /// Positioning is not available on this device
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// The source delivered something that is not a valid fix
    #[error("Malformed location fix: {0}")]
    Malformed(String),
}

impl LocationError {
    /// Whether tracking should stop instead of waiting for the next fix
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Unavailable(_))
    }
}

/// Port for position fix sources
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationSourcePort: Send {
    /// Wait for the next fix
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    async fn next_fix(&mut self) -> Result<Option<PositionSample>, LocationError>;
}
