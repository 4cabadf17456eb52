//! Bus Time service configuration

use serde::{Deserialize, Serialize};

use crate::error::BusTimeError;

/// Path of the SIRI stop-monitoring resource, relative to `base_url`
pub const STOP_MONITORING_PATH: &str = "/api/siri/stop-monitoring.json";

/// Configuration for the MTA Bus Time SIRI API
///
/// The API key is deliberately not part of this struct: it is a per-query
/// input handed to [`StopMonitor::fetch`](crate::StopMonitor::fetch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusTimeConfig {
    /// Base URL of the Bus Time API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (None = no timeout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// User agent sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://bustime.mta.info".to_string()
}

fn default_user_agent() -> String {
    format!("bustime/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for BusTimeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl BusTimeConfig {
    /// Create a configuration pointing at a local mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: Some(5),
            ..Default::default()
        }
    }

    /// Full URL of the stop-monitoring endpoint
    #[must_use]
    pub fn stop_monitoring_url(&self) -> String {
        format!(
            "{}{STOP_MONITORING_PATH}",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`BusTimeError::Configuration`] if the configuration is invalid.
    pub fn validate(&self) -> Result<(), BusTimeError> {
        if self.base_url.trim().is_empty() {
            return Err(BusTimeError::Configuration(
                "base_url must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(BusTimeError::Configuration(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
