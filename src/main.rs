use std::path::PathBuf;
use tokio::net::TcpListener;

use route_warden::config::loader::load_config;
use route_warden::config::watcher::ConfigWatcher;
use route_warden::observability::logging::init_logging;
use route_warden::{HttpServer, WardenConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "warden.toml".to_string())
        .into();

    // Missing file falls back to defaults; a broken file is fatal.
    let config = if config_path.exists() {
        load_config(&config_path)?
    } else {
        WardenConfig::default()
    };

    init_logging(&config.observability.log_level);
    tracing::info!("route-warden v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        rules = config.rules.len(),
        config = %config_path.display(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            route_warden::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config);

    // Keep the watcher handle alive for the lifetime of the server.
    let mut _watcher_handle = None;
    if config_path.exists() {
        let (watcher, updates) = ConfigWatcher::new(&config_path);
        match watcher.run() {
            Ok(handle) => {
                server.spawn_reload_task(updates);
                _watcher_handle = Some(handle);
            }
            Err(e) => tracing::error!(error = %e, "Failed to watch config file"),
        }
    }

    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
