//! Reusable cabin booking server runtime.
//!
//! [`ServerHandle`] encapsulates the service lifecycle: database init,
//! migrations, catalog seeding, REST API, metrics and graceful shutdown.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::Router;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::BookingService;
use crate::config::{AppConfig, CabinSeed, ConfigError};
use crate::domain::{DomainResult, RepositoryProvider};
use crate::infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, ApiContext, AuthState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the booking service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Insert the configured catalog when no cabins exist (default: true).
    pub seed_catalog: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_catalog: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running booking service.
///
/// # Examples
///
/// ```rust,no_run
/// use cabin_booking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Booking rules service shared with the handlers.
    pub booking: Arc<BookingService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the API is listening on.
    pub port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the booking service with the given options.
    ///
    /// 1. Install Prometheus metrics recorder
    /// 2. Connect to database and run migrations
    /// 3. Seed the cabin catalog (if enabled and empty)
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting cabin booking service...");
        let prometheus = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if opts.seed_catalog {
            match seed_cabin_catalog(repos.as_ref(), &app_cfg.cabins).await {
                Ok(0) => {}
                Ok(n) => info!("Seeded {} cabins into an empty catalog", n),
                Err(e) => {
                    error!("Failed to seed cabin catalog: {}", e);
                    return Err(e.into());
                }
            }
        }

        let (router, booking) = build_api(&app_cfg, repos.clone(), prometheus)?;

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let listener = tokio::net::TcpListener::bind(app_cfg.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);
        if booking.settings().reject_overlapping_writes {
            info!("Overlapping reservations are rejected at write time");
        } else {
            warn!("Overlapping reservations are NOT checked at write time");
        }

        let api_server = axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move {
                shutdown_signal.wait().await;
                info!("REST API server received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            booking,
            config: app_cfg,
            port: local_addr.port(),
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        let timeout = self.shutdown.timeout();
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                "REST API server did not stop within {}s, abandoning in-flight requests",
                timeout.as_secs()
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Cabin booking service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down cabin booking service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Build the booking service and the HTTP router over `repos`.
pub fn build_api(
    config: &AppConfig,
    repos: Arc<dyn RepositoryProvider>,
    prometheus: PrometheusHandle,
) -> Result<(Router, Arc<BookingService>), ConfigError> {
    let settings = config.booking.to_settings()?;
    let booking = Arc::new(BookingService::new(repos.clone(), settings));

    let auth = AuthState::new(config.security.api_key.as_deref());
    if auth.is_enabled() {
        info!("API key authentication enabled for /api routes");
    } else {
        warn!("No API key configured, /api routes are open");
    }

    let router = create_api_router(ApiContext {
        booking: booking.clone(),
        repos,
        auth,
        prometheus,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    });
    Ok((router, booking))
}

/// Insert `seeds` when the catalog is empty; returns how many were added.
///
/// All rows go in one transaction, so a failure leaves the catalog empty
/// and the next start seeds again.
pub async fn seed_cabin_catalog(
    repos: &dyn RepositoryProvider,
    seeds: &[CabinSeed],
) -> DomainResult<usize> {
    let rows: Vec<(String, i32)> = seeds
        .iter()
        .map(|seed| (seed.name.trim().to_string(), seed.capacity))
        .collect();
    let seeded = repos.cabins().seed_if_empty(&rows).await?;
    for cabin in &seeded {
        info!(id = cabin.id, name = %cabin.name, capacity = cabin.capacity, "Cabin added");
    }
    Ok(seeded.len())
}

/// Process-wide Prometheus handle.
///
/// The global recorder can only be installed once per process; later
/// starts reuse it. If another recorder is already installed, a detached
/// handle is returned and `/metrics` stays empty.
pub fn prometheus_handle() -> PrometheusHandle {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                warn!("Prometheus recorder not installed: {}", e);
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already set: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::testing::memory_repos;

    fn seeds() -> Vec<CabinSeed> {
        vec![
            CabinSeed { name: "Birch".into(), capacity: 2 },
            CabinSeed { name: "Cedar".into(), capacity: 4 },
        ]
    }

    #[tokio::test]
    async fn seeding_fills_only_an_empty_catalog() {
        let repos = memory_repos(&[]).await;
        assert_eq!(seed_cabin_catalog(repos.as_ref(), &seeds()).await.unwrap(), 2);
        assert_eq!(seed_cabin_catalog(repos.as_ref(), &seeds()).await.unwrap(), 0);

        let names: Vec<String> = repos
            .cabins()
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Birch", "Cedar"]);
    }

    #[tokio::test]
    async fn partial_seed_is_rolled_back() {
        let repos = memory_repos(&[]).await;
        let mut clashing = seeds();
        clashing.push(CabinSeed { name: " Birch ".into(), capacity: 6 });
        assert!(seed_cabin_catalog(repos.as_ref(), &clashing).await.is_err());
        assert_eq!(repos.cabins().count().await.unwrap(), 0);

        // a later start with a fixed catalog still seeds
        assert_eq!(seed_cabin_catalog(repos.as_ref(), &seeds()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn existing_catalog_is_left_alone() {
        let repos = memory_repos(&[("Maple", 5)]).await;
        assert_eq!(seed_cabin_catalog(repos.as_ref(), &seeds()).await.unwrap(), 0);
        assert_eq!(repos.cabins().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn build_api_rejects_bad_offset() {
        let repos = memory_repos(&[]).await;
        let mut cfg = AppConfig::default();
        cfg.booking.utc_offset_minutes = 5000;
        let handle = PrometheusBuilder::new().build_recorder().handle();
        assert!(build_api(&cfg, repos, handle).is_err());
    }
}
