//! Relay fleet router.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                  RELAY ROUTER                     │
//!                     │                                                   │
//!   Client request    │  ┌──────────┐     ┌──────────┐    ┌───────────┐  │
//!   ──────────────────┼─▶│   http   │────▶│ selector │───▶│ registry  │  │
//!                     │  └──────────┘     └──────────┘    └─────▲─────┘  │
//!                     │                                         │        │
//!                     │  ┌──────────┐     ┌──────────┐          │        │
//!   Status / replies  │  │messaging │────▶│  health  │──────────┘        │
//!   ──────────────────┼─▶│dispatcher│     │ passive/ │                   │
//!                     │  └──────────┘     │  reply   │                   │
//!                     │                   └──────────┘                   │
//!                     │  ┌──────────┐                                     │
//!   Admin probes      │  │  health  │  tick → missed_ping++ → probe       │
//!   ◀─────────────────┼──│  active  │                                     │
//!                     │  └──────────┘                                     │
//!                     └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use relay_router::config::{load_config, RouterConfig};
use relay_router::lifecycle::startup;
use relay_router::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "relay-router")]
#[command(about = "Least-loaded, region-aware router for a media relay fleet", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "relay-router starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        probe_interval_secs = config.health.probe_interval_secs,
        missed_ping_threshold = config.health.missed_ping_threshold,
        topic_prefix = %config.messaging.topic_prefix,
        "Configuration loaded"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Router failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
