//! Forwarded-for resolver service.
//!
//! Echoes the resolved client address of every request as JSON. Useful
//! behind a load balancer to check what the trusted proxy configuration
//! makes of real traffic.
//!
//! Usage: `xff-resolver [config.toml]`. Without a path the defaults apply
//! (listen on `0.0.0.0:8080`, trust every hop).

use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use xff_resolver::config::{load_config, ConfigWatcher, ServiceConfig};
use xff_resolver::lifecycle::{signals, Shutdown};
use xff_resolver::observability::{logging, metrics};
use xff_resolver::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!("xff-resolver v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        config_path = ?config_path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Hot reload only when running from a file; the watcher must stay alive.
    let (_watcher, config_updates) = match &config_path {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            (Some(watcher.run()?), rx)
        }
        None => {
            let (_, rx) = mpsc::unbounded_channel();
            (None, rx)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
