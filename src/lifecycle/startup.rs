//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listener from a validated configuration
//! - Build the relay server
//! - Hook OS signals to the shutdown coordinator
//! - Serve until shutdown completes

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::http::RelayServer;
use crate::lifecycle::{shutdown_signal, Shutdown};

/// Errors that abort startup or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Failed to bind the listening socket.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind the configured listen address.
pub async fn bind_listener(config: &RelayConfig) -> Result<TcpListener, StartupError> {
    TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })
}

/// Bind, serve, and return once an interrupt has drained the server.
pub async fn run(config: RelayConfig) -> Result<(), StartupError> {
    let listener = bind_listener(&config).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Serving proxy");
    tracing::info!(upstream = %config.upstream.base_url, "Forwarding requests");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_shutdown.trigger();
    });

    let server = RelayServer::new(config);
    server.run(listener, server_shutdown).await?;

    Ok(())
}
