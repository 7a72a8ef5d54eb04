//! Cabin booking service CLI
//!
//! Headless REST server suitable for deployment as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/cabin-booking/config.toml)
//! cabin-booking
//!
//! # Custom config path
//! cabin-booking --config /etc/cabin-booking/config.toml
//!
//! # Override the port
//! cabin-booking --port 8080
//!
//! # Validate config without starting
//! cabin-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use cabin_booking::config::AppConfig;
use cabin_booking::server::{init_tracing, ServerHandle, ServerOptions};

/// Cabin booking service: availability search and reservations over REST.
#[derive(Parser, Debug)]
#[command(
    name = "cabin-booking",
    version,
    about = "Reservation backend for rental cabins",
    long_about = "Cabin booking REST API: availability search, group allocation \
                  and reservation management.\n\n\
                  Default config: ~/.config/cabin-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CABIN_BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip seeding the cabin catalog.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(cabin_booking::default_config_path);

    // A broken config must not start the server with open defaults
    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            if cli.check {
                eprintln!("Configuration is invalid: {}", e);
            } else {
                eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            }
            std::process::exit(1);
        }
    };

    // The log level must be final before tracing starts
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Auth        : {}", if config.security.api_key.is_some() { "api key" } else { "open" });
        println!("   Threshold   : {}", config.booking.group_threshold);
        println!("   UTC offset  : {} min", config.booking.utc_offset_minutes);
        println!("   Cabins      : {} seeded", config.cabins.len());
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_catalog: !cli.no_seed,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
