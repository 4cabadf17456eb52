//! Property-based tests for query building and visit parsing

use bustime::{
    Delivery, LINE_REF_PREFIX, MalformedResponse, StopQuery, Visit, meters_to_miles, parser,
};
use proptest::prelude::*;
use serde_json::{Value, json};

fn raw_visit(route: &str, stop_name: &str, stops: u32, meters: f64) -> Value {
    json!({
        "MonitoredVehicleJourney": {
            "PublishedLineName": route,
            "MonitoredCall": {
                "StopPointName": stop_name,
                "Extensions": {
                    "Distances": { "StopsFromCall": stops, "DistanceFromCall": meters }
                }
            }
        }
    })
}

fn document(visits: Vec<Value>) -> Value {
    json!({
        "Siri": {
            "ServiceDelivery": {
                "StopMonitoringDelivery": [{ "MonitoredStopVisit": visits }]
            }
        }
    })
}

fn line_ref_param(query: &StopQuery) -> Option<String> {
    query
        .to_params()
        .into_iter()
        .find(|(key, _)| *key == "LineRef")
        .map(|(_, value)| value)
}

// ============================================================================
// Query Property Tests
// ============================================================================

mod query_tests {
    use super::*;

    proptest! {
        #[test]
        fn absent_route_omits_line_ref(stop_id in "[0-9]{1,7}") {
            let query = StopQuery::new("key", stop_id.as_str());
            prop_assert!(line_ref_param(&query).is_none());
            prop_assert_eq!(query.to_params().len(), 4);
        }

        #[test]
        fn line_ref_is_prefixed_uppercase_route(route in "[a-zA-Z][a-zA-Z0-9+-]{0,5}") {
            let lower = StopQuery::new("key", "308100").with_route(route.to_lowercase());
            let upper = StopQuery::new("key", "308100").with_route(route.to_uppercase());

            let expected = format!("{LINE_REF_PREFIX}{}", route.to_uppercase());
            prop_assert_eq!(line_ref_param(&lower), Some(expected.clone()));
            prop_assert_eq!(line_ref_param(&upper), Some(expected));
        }

        #[test]
        fn blank_credentials_are_rejected(blank in "[ \t]{0,3}") {
            prop_assert!(StopQuery::new(blank.as_str(), "308100").validate().is_err());
            prop_assert!(StopQuery::new("key", blank.as_str()).validate().is_err());
        }
    }
}

// ============================================================================
// Visit Property Tests
// ============================================================================

mod visit_tests {
    use super::*;

    proptest! {
        #[test]
        fn distance_is_rounded_conversion(meters in 0.0f64..50_000.0f64) {
            let exact = meters * 3.28084 / 5280.0;
            let miles = meters_to_miles(meters);
            prop_assert!((miles - exact).abs() <= 0.005 + 1e-9);

            let hundredths = miles * 100.0;
            prop_assert!((hundredths - hundredths.round()).abs() < 1e-6);
        }

        #[test]
        fn visits_keep_upstream_order(stops in proptest::collection::vec(0u32..60, 0..8)) {
            let raw: Vec<Value> = stops
                .iter()
                .map(|s| raw_visit("B70", "8 AV/67 ST", *s, f64::from(*s) * 250.0))
                .collect();

            let Ok(Delivery::Visits(visits)) = parser::parse(&document(raw)) else {
                return Err(TestCaseError::fail("expected visits"));
            };
            let parsed: Vec<u32> = visits.iter().map(Visit::stops_away).collect();
            prop_assert_eq!(parsed, stops);
        }

        #[test]
        fn any_bad_record_fails_whole_batch(
            count in 1usize..6,
            bad_index in 0usize..6,
        ) {
            let bad_index = bad_index % count;
            let raw: Vec<Value> = (0..count)
                .map(|i| {
                    if i == bad_index {
                        json!({ "MonitoredVehicleJourney": { "PublishedLineName": "B70" } })
                    } else {
                        raw_visit("B70", "8 AV/67 ST", 3, 800.0)
                    }
                })
                .collect();

            prop_assert_eq!(parser::parse(&document(raw)), Err(MalformedResponse));
        }
    }
}
