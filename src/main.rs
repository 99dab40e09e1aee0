//! # Site Telemetry Service Entry Point
//!
//! Loads configuration, initializes logging and the database, then serves
//! the HTTP API.

use anyhow::Context;
use clap::Parser;
use sitedata::{
    config::ConfigLoader,
    db::{init_pool, run_migrations},
    server::{AppState, run_server},
    telemetry::init_tracing,
};

/// Site telemetry data service
#[derive(Debug, Parser)]
#[command(name = "sitedata", version, about)]
struct Cli {
    /// Override the bind address (SITEDATA_API_BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Override the database URL (SITEDATA_DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let mut config = ConfigLoader::new().load()?;
    if let Some(bind) = cli.bind {
        config.api_bind_addr = bind;
    }
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }
    config.validate()?;
    config
        .bind_addr()
        .with_context(|| format!("invalid bind address '{}'", config.api_bind_addr))?;

    let _log_guard = init_tracing(&config)?;

    if let Ok(redacted_json) = config.redacted_json() {
        tracing::info!(profile = %config.profile, config = %redacted_json, "Loaded configuration");
    }

    let db = init_pool(&config).await?;
    run_migrations(&db).await?;

    run_server(AppState::new(config, db)).await
}
