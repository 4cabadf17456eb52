//! HTTP client for the Bus Time SIRI stop-monitoring endpoint

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::BusTimeConfig;
use crate::error::BusTimeError;
use crate::parser::{self, Delivery};
use crate::query::StopQuery;

/// Trait for clients that can fetch a stop-monitoring document
///
/// Implementations perform exactly one request per call and never retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StopMonitoringClient: Send + Sync {
    /// Fetch and decode the stop-monitoring response for a query
    ///
    /// Returns the decoded JSON document without interpreting it.
    async fn stop_monitoring(&self, query: &StopQuery) -> Result<Value, BusTimeError>;
}

/// Stop-monitoring client backed by reqwest
#[derive(Debug)]
pub struct HttpStopMonitoringClient {
    client: Client,
    config: BusTimeConfig,
}

impl HttpStopMonitoringClient {
    /// Create a new Bus Time HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &BusTimeConfig) -> Result<Self, BusTimeError> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| BusTimeError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &BusTimeConfig {
        &self.config
    }

    /// Map a transport error, dropping the URL so the API key never leaks
    fn transport_error(&self, e: reqwest::Error) -> BusTimeError {
        if e.is_timeout() {
            BusTimeError::Timeout {
                timeout_secs: self.config.timeout_secs.unwrap_or_default(),
            }
        } else {
            BusTimeError::ConnectionFailed(e.without_url().to_string())
        }
    }
}

#[async_trait]
impl StopMonitoringClient for HttpStopMonitoringClient {
    #[instrument(skip(self, query), fields(stop_id = %query.stop_id(), route = ?query.route()))]
    async fn stop_monitoring(&self, query: &StopQuery) -> Result<Value, BusTimeError> {
        let url = self.config.stop_monitoring_url();

        debug!(?url, max_visits = query.max_visits(), "Requesting stop monitoring");

        let response = self
            .client
            .get(&url)
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        let request_failed = BusTimeError::RequestFailed {
            status: status.as_u16(),
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(document) if status.is_success() => Ok(document),
            // Bus Time reports bad keys and unknown stops with a SIRI error body
            Ok(document) if matches!(parser::parse(&document), Ok(Delivery::UpstreamError(_))) => {
                warn!(%status, "Non-success status with SIRI error condition");
                Ok(document)
            },
            Ok(_) => Err(request_failed),
            Err(e) if status.is_success() => Err(BusTimeError::InvalidBody(e.to_string())),
            Err(_) => Err(request_failed),
        }
    }
}
