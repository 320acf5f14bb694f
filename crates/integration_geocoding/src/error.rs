//! Geocoding error types

use thiserror::Error;

/// Errors that can occur while talking to a geocoding service
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with an error status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the service response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The service asked us to slow down (HTTP 429)
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the service)
        retry_after_secs: Option<u64>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl GeocodingError {
    /// Returns true if a later request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }

    /// Map a transport error from reqwest
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(GeocodingError::ConnectionFailed("refused".to_string()).is_retryable());
        assert!(GeocodingError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            GeocodingError::RateLimitExceeded {
                retry_after_secs: Some(1)
            }
            .is_retryable()
        );
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!GeocodingError::ParseError("bad json".to_string()).is_retryable());
        assert!(!GeocodingError::ConfigurationError("bad url".to_string()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = GeocodingError::Timeout { timeout_secs: 10 };
        assert_eq!(err.to_string(), "Request timed out after 10 seconds");

        let err = GeocodingError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));
    }
}
