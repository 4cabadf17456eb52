//! Stop-monitoring query parameters

use std::fmt;

use crate::error::BusTimeError;

/// Operator reference sent with every request
pub const OPERATOR_REF: &str = "MTA";

/// Tag prefixed onto route names to form a SIRI `LineRef`
pub const LINE_REF_PREFIX: &str = "MTA NYCT_";

/// Number of visits requested when the caller does not say otherwise
pub const DEFAULT_MAX_VISITS: u32 = 3;

/// Inputs for one stop-monitoring request
///
/// Built with [`StopQuery::new`] and the `with_*` setters, then checked by
/// [`StopQuery::validate`] before anything goes over the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct StopQuery {
    api_key: String,
    stop_id: String,
    route: Option<String>,
    max_visits: u32,
}

impl StopQuery {
    /// Create a query for a stop, with no route filter and the default visit cap
    ///
    /// Stop ids are opaque: numeric ids are carried as their decimal text.
    #[must_use]
    pub fn new(api_key: impl Into<String>, stop_id: impl ToString) -> Self {
        Self {
            api_key: api_key.into(),
            stop_id: stop_id.to_string(),
            route: None,
            max_visits: DEFAULT_MAX_VISITS,
        }
    }

    /// Restrict the query to one route (e.g. "B70")
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set the maximum number of visits requested from upstream
    #[must_use]
    pub const fn with_max_visits(mut self, max_visits: u32) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// The API key
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The monitored stop id
    #[must_use]
    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    /// The route filter, if one was given and is non-blank
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        self.route
            .as_deref()
            .map(str::trim)
            .filter(|route| !route.is_empty())
    }

    /// Maximum number of visits requested
    #[must_use]
    pub const fn max_visits(&self) -> u32 {
        self.max_visits
    }

    /// SIRI line reference for the route filter
    #[must_use]
    pub fn line_ref(&self) -> Option<String> {
        self.route()
            .map(|route| format!("{LINE_REF_PREFIX}{}", route.to_uppercase()))
    }

    /// Check that the query can be sent
    ///
    /// # Errors
    ///
    /// Returns [`BusTimeError::Configuration`] when the API key or stop id is
    /// blank, or the visit cap is zero.
    pub fn validate(&self) -> Result<(), BusTimeError> {
        if self.api_key.trim().is_empty() {
            return Err(BusTimeError::Configuration(
                "api_key must not be empty".to_string(),
            ));
        }

        if self.stop_id.trim().is_empty() {
            return Err(BusTimeError::Configuration(
                "stop_id must not be empty".to_string(),
            ));
        }

        if self.max_visits == 0 {
            return Err(BusTimeError::Configuration(
                "max_visits must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Query string parameters for the stop-monitoring endpoint
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("OperatorRef", OPERATOR_REF.to_string()),
            ("MonitoringRef", self.stop_id.clone()),
            ("MaximumStopVisits", self.max_visits.to_string()),
        ];

        if let Some(line_ref) = self.line_ref() {
            params.push(("LineRef", line_ref));
        }

        params
    }
}

impl fmt::Debug for StopQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopQuery")
            .field("api_key", &"[REDACTED]")
            .field("stop_id", &self.stop_id)
            .field("route", &self.route)
            .field("max_visits", &self.max_visits)
            .finish()
    }
}
