//! Bus Time data models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedResponse;
use crate::parser::RawStopVisit;

/// Feet in one meter
pub const FEET_PER_METER: f64 = 3.28084;

/// Feet in one mile
pub const FEET_PER_MILE: f64 = 5280.0;

/// One upcoming bus arrival at the monitored stop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    /// Published line name (e.g. "B70")
    route: String,
    /// Name of the monitored stop
    #[serde(skip)]
    monitored_stop: String,
    /// Stops between the vehicle and the monitored stop
    stops_away: u32,
    /// Distance from the monitored stop, in miles
    #[serde(rename = "distance")]
    distance_miles: f64,
}

impl Visit {
    /// Build a visit, deriving the distance in miles from meters
    #[must_use]
    pub fn new(
        route: impl Into<String>,
        monitored_stop: impl Into<String>,
        stops_away: u32,
        distance_meters: f64,
    ) -> Self {
        Self {
            route: route.into(),
            monitored_stop: monitored_stop.into(),
            stops_away,
            distance_miles: meters_to_miles(distance_meters),
        }
    }

    /// Build a visit from one raw `MonitoredStopVisit` record
    ///
    /// # Errors
    ///
    /// Returns [`MalformedResponse`] if any expected field is missing or has
    /// the wrong type.
    pub fn from_raw(raw: &serde_json::Value) -> Result<Self, MalformedResponse> {
        let raw = RawStopVisit::deserialize(raw).map_err(|_| MalformedResponse)?;
        let journey = raw.monitored_vehicle_journey;
        let call = journey.monitored_call;
        let distances = call.extensions.distances;

        Ok(Self::new(
            journey.published_line_name,
            call.stop_point_name,
            distances.stops_from_call,
            distances.distance_from_call,
        ))
    }

    /// Published line name
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Name of the monitored stop
    #[must_use]
    pub fn monitored_stop(&self) -> &str {
        &self.monitored_stop
    }

    /// Stops between the vehicle and the monitored stop
    #[must_use]
    pub const fn stops_away(&self) -> u32 {
        self.stops_away
    }

    /// Distance from the monitored stop, in miles, rounded to hundredths
    #[must_use]
    pub const fn distance_miles(&self) -> f64 {
        self.distance_miles
    }
}

impl fmt::Display for Visit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug keeps the trailing ".0" on whole miles
        write!(
            f,
            "{} {} stops/{:?}mi",
            self.route, self.stops_away, self.distance_miles
        )
    }
}

/// Convert meters to miles, rounded to two decimal places
#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    round_to_hundredths(meters * FEET_PER_METER / FEET_PER_MILE)
}

/// Round half away from zero at two decimal places
///
/// Operates on the binary value, so 1.005 (stored as 1.00499...) rounds to 1.0.
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw_visit() -> serde_json::Value {
        json!({
            "MonitoredVehicleJourney": {
                "PublishedLineName": "B70",
                "MonitoredCall": {
                    "StopPointName": "8 AV/BAY RIDGE PKWY",
                    "Extensions": {
                        "Distances": {
                            "StopsFromCall": 4,
                            "DistanceFromCall": 1609.34,
                            "PresentableDistance": "1.0 miles away"
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_from_raw() {
        let visit = Visit::from_raw(&raw_visit()).unwrap();
        assert_eq!(visit.route(), "B70");
        assert_eq!(visit.monitored_stop(), "8 AV/BAY RIDGE PKWY");
        assert_eq!(visit.stops_away(), 4);
        assert!((visit.distance_miles() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_raw_missing_stop_name() {
        let mut raw = raw_visit();
        raw["MonitoredVehicleJourney"]["MonitoredCall"]
            .as_object_mut()
            .unwrap()
            .remove("StopPointName");
        assert_eq!(Visit::from_raw(&raw), Err(MalformedResponse));
    }

    #[test]
    fn test_from_raw_wrong_type() {
        let mut raw = raw_visit();
        raw["MonitoredVehicleJourney"]["MonitoredCall"]["Extensions"]["Distances"]
            ["StopsFromCall"] = json!("four");
        assert_eq!(Visit::from_raw(&raw), Err(MalformedResponse));
    }

    #[test]
    fn test_from_raw_not_an_object() {
        assert_eq!(Visit::from_raw(&json!([1, 2, 3])), Err(MalformedResponse));
    }

    #[test]
    fn test_meters_to_miles() {
        assert!((meters_to_miles(1609.34) - 1.0).abs() < f64::EPSILON);
        assert!((meters_to_miles(1226.87) - 0.76).abs() < f64::EPSILON);
        assert!(meters_to_miles(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rounding_boundaries() {
        // exactly representable half rounds away from zero
        assert!((round_to_hundredths(0.125) - 0.13).abs() < f64::EPSILON);
        // 1.005 is stored just below the half
        assert!((round_to_hundredths(1.005) - 1.0).abs() < f64::EPSILON);
        assert!((round_to_hundredths(2.344) - 2.34).abs() < f64::EPSILON);
        assert!((round_to_hundredths(2.346) - 2.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        let visit = Visit::new("B70", "8 AV/BAY RIDGE PKWY", 4, 1226.87);
        assert_eq!(visit.to_string(), "B70 4 stops/0.76mi");

        let visit = Visit::new("B70", "8 AV/BAY RIDGE PKWY", 9, 1609.34);
        assert_eq!(visit.to_string(), "B70 9 stops/1.0mi");

        let visit = Visit::new("B70", "8 AV/BAY RIDGE PKWY", 2, 804.67);
        assert_eq!(visit.to_string(), "B70 2 stops/0.5mi");
    }

    #[test]
    fn test_serialize() {
        let visit = Visit::new("B35", "CHURCH AV/E 18 ST", 2, 1609.34);
        let value = serde_json::to_value(&visit).unwrap();
        assert_eq!(
            value,
            json!({ "route": "B35", "stops_away": 2, "distance": 1.0 })
        );
    }
}
