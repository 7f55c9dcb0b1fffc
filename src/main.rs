//! CORS relay.
//!
//! Relays GET requests to a fixed upstream and stamps permissive CORS headers
//! on every reply, so browser apps on another origin can call a backend that
//! does not speak CORS itself.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                  CORS RELAY                   │
//!   Browser          │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ─────────────────┼─▶│ listener │──▶│  http    │──▶│ upstream │──┼──▶ Upstream
//!   GET /p?q=v       │  │  :3001   │   │ server   │   │  client  │  │    :54323
//!                    │  └──────────┘   └────┬─────┘   └────┬─────┘  │
//!                    │                      │ OPTIONS      │        │
//!   ◀────────────────┼──── cors headers ◀───┴──────────────┘        │
//!                    │                                              │
//!                    │   config · logging · lifecycle (shutdown)    │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use cors_relay::config::resolve_config;
use cors_relay::lifecycle::startup;
use cors_relay::observability::init_logging;

#[derive(Parser)]
#[command(name = "cors-relay")]
#[command(about = "Relay GET requests to a fixed upstream with CORS headers added", long_about = None)]
struct Cli {
    /// Optional TOML configuration file; built-in defaults apply without it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!("cors-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
