//! MTA Bus Time stop monitoring
//!
//! Queries the [Bus Time](https://bustime.mta.info) SIRI stop-monitoring
//! endpoint for one stop (and optionally one route) and turns the response
//! into a list of upcoming [`Visit`]s.
//!
//! # Architecture
//!
//! [`StopMonitoringClient`] is the transport seam, implemented over HTTP by
//! [`HttpStopMonitoringClient`]. [`StopMonitor::fetch`] validates a
//! [`StopQuery`], performs a single request through the client and hands the
//! document to the [`parser`]. Upstream-reported errors and malformed
//! responses end up in the monitor's [`MonitorOutcome`]; configuration and
//! transport failures are returned as [`BusTimeError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use bustime::{BusTimeConfig, HttpStopMonitoringClient, StopMonitor, StopQuery};
//!
//! let client = HttpStopMonitoringClient::new(&BusTimeConfig::default())?;
//! let query = StopQuery::new(api_key, "308100").with_route("B70").with_max_visits(2);
//!
//! let monitor = StopMonitor::fetch(&client, query).await?;
//! println!("{monitor}");
//! ```

mod client;
mod config;
mod error;
mod models;
mod monitor;
pub mod parser;
mod query;

pub use client::{HttpStopMonitoringClient, StopMonitoringClient};
pub use config::{BusTimeConfig, STOP_MONITORING_PATH};
pub use error::{BusTimeError, MalformedResponse};
pub use models::{FEET_PER_METER, FEET_PER_MILE, Visit, meters_to_miles, round_to_hundredths};
pub use monitor::{MonitorOutcome, NO_BUSES_MESSAGE, StopMonitor};
pub use parser::Delivery;
pub use query::{DEFAULT_MAX_VISITS, LINE_REF_PREFIX, OPERATOR_REF, StopQuery};
