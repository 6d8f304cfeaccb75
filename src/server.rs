//! Server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: storage, notification
//! outbox, inquiry expiry task, REST API and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::start_inquiry_expiry_task;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::modules::metrics::describe_metrics;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::notifications::{InMemoryNotificationSink, LogEmailSink, Notifier};
use crate::shared::shutdown::{cleanup_with_timeout, listen_for_shutdown_signals, ShutdownSignal};
use crate::{init_database, InMemoryRepositoryProvider, SeaOrmRepositoryProvider};

// ── Options ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ServerOptions {
    pub config: AppConfig,
    /// Keep everything in process memory instead of the configured database.
    pub in_memory: bool,
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running booking server.
///
/// ```rust,no_run
/// use tour_booking::server::{ServerHandle, ServerOptions};
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
    pub repos: Arc<dyn RepositoryProvider>,
    pub notifier: Notifier,
    /// In-app notifications delivered so far
    pub inbox: Arc<InMemoryNotificationSink>,
    pub config: AppConfig,
    /// Address the API is bound to (resolves port 0)
    pub api_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// 1. Install the Prometheus recorder
    /// 2. Open storage (SQLite/Postgres with migrations, or in-memory)
    /// 3. Start the notification outbox
    /// 4. Start the inquiry expiry task
    /// 5. Serve the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting tour booking service...");

        let prometheus = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if opts.in_memory {
                warn!("Using in-memory storage; data is lost on exit");
                (Arc::new(InMemoryRepositoryProvider::new()), None)
            } else {
                let db = init_database(&app_cfg.database_config()).await?;
                (
                    Arc::new(SeaOrmRepositoryProvider::new(db.clone())),
                    Some(db),
                )
            };

        // ── Notifications ──────────────────────────────────────
        let inbox = Arc::new(InMemoryNotificationSink::new());
        let notifier = Notifier::spawn(
            repos.clone(),
            inbox.clone(),
            Arc::new(LogEmailSink),
            app_cfg.notifier_settings(),
        );
        info!(
            email_enabled = app_cfg.notifications.email_enabled,
            "🔔 Notification outbox started"
        );

        // ── Background tasks ───────────────────────────────────
        let shutdown = ShutdownSignal::new();
        start_inquiry_expiry_task(
            repos.clone(),
            shutdown.clone(),
            app_cfg.inquiries.expiry_days,
            app_cfg.inquiries.expiry_check_interval_secs,
        );

        // ── REST API server ────────────────────────────────────
        let state = ApiState::new(repos.clone(), notifier.clone(), db.clone(), prometheus);
        let router = create_api_router(state);

        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let api_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started");

        Ok(Self {
            repos,
            notifier,
            inbox,
            config: app_cfg,
            api_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM / SIGINT.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the API to stop, drain queued notifications and close storage.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        match self.api_task.await {
            Ok(()) => info!("REST API server stopped"),
            Err(e) => error!("REST API server task panicked: {}", e),
        }

        let notifier = self.notifier.clone();
        if !cleanup_with_timeout(self.config.server.shutdown_timeout, async move {
            notifier.flush().await;
        })
        .await
        {
            warn!("Pending notifications were not delivered before shutdown");
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        }

        info!("👋 Tour booking service shutdown complete");
    }

    pub async fn shutdown(self) {
        info!("🛑 Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can be installed once per process; later calls
/// (tests, restarts) reuse the first handle.
fn prometheus_handle() -> PrometheusHandle {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                describe_metrics();
                info!("📊 Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                warn!(error = %e, "Prometheus recorder already installed, /metrics will be empty");
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

/// Initialize tracing from the application config. Call once at startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
