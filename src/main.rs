//! Enviromux Prometheus Exporter
//!
//! This application exposes the sensor and device state of an Enviromux
//! environmental-monitoring appliance as Prometheus metrics.
//!
//! # Architecture
//!
//! Every scrape of `/metrics` runs one synchronous collection cycle:
//! - **Authenticate**: POST the credentials, receive a session cookie
//! - **Fetch**: GET the JSON status document with that session
//! - **Map**: flatten the document into eight gauge families
//!
//! Nothing is cached between scrapes, and overlapping scrapes wait for
//! each other.

mod config;
mod enviromux;
mod error;
mod exposition;
mod model;
mod server;

#[cfg(test)]
mod test_utils;

use crate::enviromux::{Client, EnviromuxCollector};
use crate::error::{Error, Result};
use crate::server::HttpServer;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};

/// Application entry point.
///
/// Configuration problems are fatal: the process exits before the
/// listening port is bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_app_config().map_err(Error::from)?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    if let Err(e) = run().await {
        tracing::error!("Exporter stopped: {:?}", e);
        return Err(e.into());
    }
    Ok(())
}

async fn run() -> Result<()> {
    let enviromux_config = config::load_enviromux_config()?;
    tracing::info!(
        "Exporting Enviromux {} (login {}, data {}, timeout {}s)",
        enviromux_config.device_address,
        enviromux_config.login_url,
        enviromux_config.data_url,
        enviromux_config.timeout
    );

    let listen_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, enviromux_config.listening_port));
    let metric_prefix = enviromux_config.metric_prefix.clone();

    let client = Client::new(enviromux_config)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
    let collector = Arc::new(EnviromuxCollector::new(Arc::new(client)));

    let server = HttpServer::new(collector, listen_addr, metric_prefix);
    server.run(shutdown_signal()).await?;
    Ok(())
}

/// Resolves on SIGTERM or Ctrl-C.
async fn shutdown_signal() {
    let mut sig_term = match signal(SignalKind::terminate()) {
        Ok(sig_term) => sig_term,
        Err(e) => {
            tracing::error!("Failed to register SIGTERM handler: {:?}", e);
            let _ = ctrl_c().await;
            return;
        }
    };
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");

    tokio::select! {
        // Handle SIGTERM for graceful shutdown in containers
        _ = sig_term.recv() => {
            tracing::info!("Received SIGTERM. Exiting...");
        }
        // Handle Ctrl-C for manual termination
        _ = ctrl_c() => {
            tracing::info!("Received SIGINT. Exiting...");
        }
    }
}
