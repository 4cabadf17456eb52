//! Bus Time error types

use thiserror::Error;

/// Errors that can occur while querying the Bus Time API
///
/// Only configuration and transport problems surface here. Problems the
/// upstream reports itself, and responses that do not match the expected
/// shape, are captured into the [`StopMonitor`](crate::StopMonitor) outcome
/// instead.
#[derive(Debug, Error)]
pub enum BusTimeError {
    /// Required input was missing or invalid; raised before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection to the Bus Time service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request returned a non-success status without a SIRI error body
    #[error("Request failed: HTTP {status}")]
    RequestFailed {
        /// The HTTP status code
        status: u16,
    },

    /// Response body could not be decoded as JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl BusTimeError {
    /// Returns true if this error is retryable
    ///
    /// The library itself never retries; this is a hint for callers.
    /// Client errors (4xx) will fail the same way again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::RequestFailed { status } => *status >= 500,
            Self::Configuration(_) | Self::InvalidBody(_) => false,
        }
    }

    /// Returns true if this error was raised before contacting the service
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// The response did not match the expected stop-monitoring shape
///
/// Carries no detail on purpose: every shape mismatch collapses into the
/// same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the upstream response was invalid")]
pub struct MalformedResponse;
