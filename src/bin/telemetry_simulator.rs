//! Field client that registers a demo site and streams random telemetry to a
//! running service.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sitedata::simulator::{self, SimulatorConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "telemetry-simulator", version, about)]
struct Args {
    /// Base URL of the telemetry service
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Seconds between telemetry samples
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: u64,

    #[arg(long, default_value = "Willo Woods")]
    site_name: String,

    #[arg(long, default_value = "north")]
    site_location: String,

    /// Battery vendor for the demo configuration ("Tesla" or "KATL")
    #[arg(long, default_value = "Tesla")]
    vendor: String,

    /// Stop after this many samples instead of running until Ctrl-C
    #[arg(long)]
    count: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SimulatorConfig {
        base_url: args.base_url,
        interval: Duration::from_secs(args.interval_secs),
        site_name: args.site_name,
        site_location: args.site_location,
        battery_vendor: args.vendor,
        max_samples: args.count,
    };

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let sent = simulator::run(config, shutdown)
        .await
        .context("simulator setup failed")?;
    tracing::info!(samples = sent, "Simulator finished");
    Ok(())
}
