//! Cabin booking service
//!
//! Reads configuration from a TOML file (~/.config/cabin-booking/config.toml
//! or `$CABIN_BOOKING_CONFIG`) and serves the REST API until SIGINT/SIGTERM.

use tracing::info;

use cabin_booking::config::AppConfig;
use cabin_booking::default_config_path;
use cabin_booking::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = default_config_path();

    // A broken config must not start the server with open defaults
    let config = AppConfig::load(&config_path).map_err(|e| {
        eprintln!("Failed to load config from {}: {}", config_path.display(), e);
        e
    })?;
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
