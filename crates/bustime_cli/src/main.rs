//! Bus Time CLI
//!
//! Prints the upcoming buses at a stop, as text or JSON.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use bustime::{
    BusTimeConfig, BusTimeError, DEFAULT_MAX_VISITS, HttpStopMonitoringClient, StopMonitor,
    StopQuery,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bus Time CLI
#[derive(Debug, Parser)]
#[command(name = "bustime")]
#[command(author, version, about = "Upcoming MTA buses at a stop", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Bus Time API key
    #[arg(long, env = "BUSTIME_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Stop id to monitor (e.g. 308100)
    #[arg(short, long)]
    stop: Option<String>,

    /// Only show buses on this route (e.g. B70)
    #[arg(short, long)]
    route: Option<String>,

    /// Maximum number of buses to request
    #[arg(short, long, alias = "max_visits", default_value_t = DEFAULT_MAX_VISITS)]
    max_visits: u32,

    /// Print the JSON rendering instead of text
    #[arg(long)]
    json: bool,

    /// Override the Bus Time API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Cli {
    /// Build the service configuration from the overrides
    fn config(&self) -> BusTimeConfig {
        let mut config = BusTimeConfig::default();
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        config.timeout_secs = self.timeout_secs;
        config
    }

    /// Build the query; missing values are left blank for validation to reject
    fn query(&self) -> StopQuery {
        let mut query = StopQuery::new(
            self.api_key.clone().unwrap_or_default(),
            self.stop.clone().unwrap_or_default(),
        )
        .with_max_visits(self.max_visits);

        if let Some(route) = &self.route {
            query = query.with_route(route.clone());
        }
        query
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Fetch the monitor and render it
async fn run(cli: &Cli) -> anyhow::Result<String> {
    let query = cli.query();
    // reject bad input before building anything network-facing
    query.validate()?;

    info!(stop = query.stop_id(), route = ?query.route(), "Querying Bus Time");

    let client = HttpStopMonitoringClient::new(&cli.config())?;
    let monitor = StopMonitor::fetch(&client, query).await?;

    if cli.json {
        Ok(serde_json::to_string_pretty(&monitor.to_json())?)
    } else {
        Ok(monitor.to_string())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        },
        Err(e)
            if e
                .downcast_ref::<BusTimeError>()
                .is_some_and(BusTimeError::is_configuration) =>
        {
            eprintln!("❌ {e}");
            eprintln!("   Set BUSTIME_API_KEY (or --api-key) and pass --stop <STOP>");
            std::process::exit(2);
        },
        Err(e) => Err(e),
    }
}
