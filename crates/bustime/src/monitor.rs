//! Stop monitor: one query against the Bus Time API and its outcome

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::client::StopMonitoringClient;
use crate::error::{BusTimeError, MalformedResponse};
use crate::models::Visit;
use crate::parser::{self, Delivery};
use crate::query::StopQuery;

/// Line shown when a stop has no buses on the way
pub const NO_BUSES_MESSAGE: &str = "No buses en route";

/// Result of one stop-monitoring query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorOutcome {
    /// The upstream reported an error, or its response was malformed
    Error(String),
    /// Upcoming visits in upstream order (possibly none)
    Visits(Vec<Visit>),
}

impl From<Result<Delivery, MalformedResponse>> for MonitorOutcome {
    fn from(parsed: Result<Delivery, MalformedResponse>) -> Self {
        match parsed {
            Ok(Delivery::Visits(visits)) => Self::Visits(visits),
            Ok(Delivery::UpstreamError(description)) => Self::Error(description),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Upcoming bus visits at one stop
///
/// Built once per query by [`StopMonitor::fetch`] and immutable afterwards.
/// A new monitor must be fetched to see fresh data.
#[derive(Debug, Clone, PartialEq)]
pub struct StopMonitor {
    stop_id: String,
    route: Option<String>,
    max_visits: u32,
    outcome: MonitorOutcome,
}

impl StopMonitor {
    /// Query the stop-monitoring endpoint once and capture the outcome
    ///
    /// Upstream-reported errors and malformed responses are captured in the
    /// returned monitor; see [`StopMonitor::error`].
    ///
    /// # Errors
    ///
    /// Returns [`BusTimeError::Configuration`] without contacting the service
    /// when the query is invalid, and a transport error when the request
    /// itself fails.
    #[instrument(skip(client, query), fields(stop_id = %query.stop_id(), route = ?query.route()))]
    pub async fn fetch<C>(client: &C, query: StopQuery) -> Result<Self, BusTimeError>
    where
        C: StopMonitoringClient + ?Sized,
    {
        query.validate()?;

        let parsed = match client.stop_monitoring(&query).await {
            Ok(document) => parser::parse(&document),
            Err(BusTimeError::InvalidBody(reason)) => {
                warn!(%reason, "Response body is not JSON");
                Err(MalformedResponse)
            },
            Err(e) => return Err(e),
        };

        let monitor = Self::from_parsed(&query, parsed);
        match &monitor.outcome {
            MonitorOutcome::Visits(visits) => debug!(count = visits.len(), "Visits found"),
            MonitorOutcome::Error(error) => warn!(%error, "Stop monitoring returned an error"),
        }
        Ok(monitor)
    }

    /// Build a monitor from an already decoded response document
    #[must_use]
    pub fn from_document(query: &StopQuery, document: &Value) -> Self {
        Self::from_parsed(query, parser::parse(document))
    }

    fn from_parsed(query: &StopQuery, parsed: Result<Delivery, MalformedResponse>) -> Self {
        Self {
            stop_id: query.stop_id().to_string(),
            route: query.route().map(str::to_string),
            max_visits: query.max_visits(),
            outcome: parsed.into(),
        }
    }

    /// The monitored stop id
    #[must_use]
    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    /// The route filter, if any
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// Maximum number of visits that was requested
    #[must_use]
    pub const fn max_visits(&self) -> u32 {
        self.max_visits
    }

    /// The query outcome
    #[must_use]
    pub const fn outcome(&self) -> &MonitorOutcome {
        &self.outcome
    }

    /// Upcoming visits; empty when the query ended in an error
    #[must_use]
    pub fn visits(&self) -> &[Visit] {
        match &self.outcome {
            MonitorOutcome::Visits(visits) => visits,
            MonitorOutcome::Error(_) => &[],
        }
    }

    /// Error description, if the query ended in an error
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            MonitorOutcome::Error(error) => Some(error),
            MonitorOutcome::Visits(_) => None,
        }
    }

    /// Name of the monitored stop, taken from the first visit
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.visits().first().map(Visit::monitored_stop)
    }

    /// Structured rendering: `{"error": ...}` or `{"visits": [...]}`
    #[must_use]
    pub fn to_json(&self) -> Value {
        match &self.outcome {
            MonitorOutcome::Error(error) => json!({ "error": error }),
            MonitorOutcome::Visits(visits) => json!({ "visits": visits }),
        }
    }
}

impl fmt::Display for StopMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visits = match &self.outcome {
            MonitorOutcome::Error(error) => return f.write_str(error),
            MonitorOutcome::Visits(visits) => visits,
        };

        let mut lines = Vec::with_capacity(visits.len() + 1);
        if let Some(name) = self.name() {
            lines.push(name.to_string());
        }
        if visits.is_empty() {
            lines.push(NO_BUSES_MESSAGE.to_string());
        }
        lines.extend(visits.iter().map(Visit::to_string));

        f.write_str(&lines.join("\n"))
    }
}
