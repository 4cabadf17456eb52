//! SIRI stop-monitoring response parsing
//!
//! Decodes the fixed `Siri.ServiceDelivery.StopMonitoringDelivery[0]` path
//! through typed intermediates. Every shape mismatch along the way yields the
//! same [`MalformedResponse`]; there are no partial results.

use serde::Deserialize;
use serde_json::Value;

use crate::error::MalformedResponse;
use crate::models::Visit;

/// Contents of the first stop-monitoring delivery
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The upstream reported an error condition with this description
    UpstreamError(String),
    /// Upcoming visits, in upstream order
    Visits(Vec<Visit>),
}

/// Parse a decoded stop-monitoring response document
///
/// # Errors
///
/// Returns [`MalformedResponse`] if the document does not match the expected
/// shape anywhere along the fixed path, or if any visit record is malformed.
pub fn parse(document: &Value) -> Result<Delivery, MalformedResponse> {
    let envelope = RawEnvelope::deserialize(document).map_err(|_| MalformedResponse)?;
    let first = envelope
        .siri
        .service_delivery
        .stop_monitoring_delivery
        .first()
        .ok_or(MalformedResponse)?;
    let delivery = RawDelivery::deserialize(first).map_err(|_| MalformedResponse)?;

    if let Some(condition) = delivery.error_condition {
        return Ok(Delivery::UpstreamError(condition.description));
    }

    let raw_visits = delivery
        .monitored_stop_visit
        .as_ref()
        .and_then(Value::as_array)
        .ok_or(MalformedResponse)?;

    raw_visits
        .iter()
        .map(Visit::from_raw)
        .collect::<Result<Vec<_>, _>>()
        .map(Delivery::Visits)
}

/// Parse a raw response body
///
/// # Errors
///
/// Returns [`MalformedResponse`] if the body is not JSON or fails [`parse`].
pub fn parse_str(body: &str) -> Result<Delivery, MalformedResponse> {
    let document: Value = serde_json::from_str(body).map_err(|_| MalformedResponse)?;
    parse(&document)
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEnvelope {
    siri: RawSiri,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSiri {
    service_delivery: RawServiceDelivery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawServiceDelivery {
    // only the first delivery is decoded further
    stop_monitoring_delivery: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDelivery {
    error_condition: Option<RawErrorCondition>,
    // left undecoded until the error condition has been ruled out
    monitored_stop_visit: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawErrorCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawStopVisit {
    pub(crate) monitored_vehicle_journey: RawVehicleJourney,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawVehicleJourney {
    pub(crate) published_line_name: String,
    pub(crate) monitored_call: RawMonitoredCall,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawMonitoredCall {
    pub(crate) stop_point_name: String,
    pub(crate) extensions: RawExtensions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawExtensions {
    pub(crate) distances: RawDistances,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawDistances {
    pub(crate) stops_from_call: u32,
    pub(crate) distance_from_call: f64,
}
