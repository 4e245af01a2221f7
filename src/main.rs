//! relayd, an HTTP relay bank controller.
//!
//! A small HTTP server that switches a fixed bank of relays and reports
//! their state as JSON.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                    RELAYD                      │
//!                    │                                                │
//!  Client Request    │  ┌─────────┐   ┌─────────┐   ┌─────────────┐  │
//!  ──────────────────┼─▶│   net   │──▶│  http   │──▶│    relay    │  │
//!                    │  │listener │   │ server  │   │ command/bank│  │
//!                    │  └─────────┘   └────┬────┘   └──────┬──────┘  │
//!                    │                     │               │         │
//!  Client Response   │  ┌─────────┐        │               ▼         │
//!  ◀─────────────────┼──│response │◀───────┘        ┌─────────────┐  │
//!                    │  │ encoder │                 │   output    │  │
//!                    │  └─────────┘                 │   driver    │──┼──▶ lines
//!                    │                              └─────────────┘  │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │ config · lifecycle · tracing             │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └────────────────────────────────────────────────┘
//! ```
//!
//! Connections are served strictly one at a time: the relay bank is the
//! only mutable state and is never shared across tasks.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relayd::config::{load_config, RelayConfig};
use relayd::http::HttpServer;
use relayd::lifecycle::Shutdown;
use relayd::net::Listener;
use relayd::relay::{LoggingDriver, RelayBank};

#[derive(Parser)]
#[command(name = "relayd")]
#[command(about = "HTTP relay bank controller", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    // Initialize tracing subscriber; the environment wins over the config.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "relayd={}",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("relayd v0.1.0 starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        relay_count = config.relays.count,
        max_request_bytes = config.limits.max_request_bytes,
        "Configuration loaded"
    );

    let bank = RelayBank::new(config.relays.lines.clone(), LoggingDriver);
    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config, bank);
    server.run(listener, server_shutdown).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
