//! Are You Safe server entry point.

use std::sync::Arc;
use std::time::Duration;

use areyousafe_api::{AppState, cors_layer, router as api_router};
use areyousafe_common::{Config, StorageBackend};
use areyousafe_core::{
    DatabaseReportStore, InMemoryReportStore, ReconciliationService, ReconciliationWorker,
    ReportService, RetryConfig, SharedReportStore,
};
use areyousafe_db::repositories::{
    ReportRepository, UserAccHistoryRepository, UserAccRepository, UserRoleRepository,
    UsersRepository,
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long pending reconciliation jobs may run after shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "areyousafe=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting Are You Safe API...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = areyousafe_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    areyousafe_db::migrate(&db).await?;
    info!("Migrations completed");

    let db = Arc::new(db);

    let store: SharedReportStore = match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory report store, reports are lost on restart");
            Arc::new(InMemoryReportStore::new())
        }
        StorageBackend::Database => {
            info!("Using database report store");
            Arc::new(DatabaseReportStore::new(ReportRepository::new(Arc::clone(&db))))
        }
    };

    let reconciliation = ReconciliationService::new(
        UsersRepository::new(Arc::clone(&db)),
        UserRoleRepository::new(Arc::clone(&db)),
        UserAccRepository::new(Arc::clone(&db)),
        UserAccHistoryRepository::new(Arc::clone(&db)),
        config.reconciliation.timeout(),
    );

    // Start the reconciliation worker
    let (queue, worker_handle) = if config.reconciliation.enabled {
        let worker = ReconciliationWorker::new(
            config.reconciliation.queue_size,
            config.reconciliation.workers,
            RetryConfig::from(&config.reconciliation),
        );
        let queue = worker.queue();
        let handle = worker.start(Arc::new(reconciliation.clone()));
        (Some(queue), Some(handle))
    } else {
        warn!("Reconciliation disabled, reports will not reach the user tables");
        (None, None)
    };

    let report_service = ReportService::new(store, reconciliation, queue);
    let state = AppState::new(report_service);

    let app = api_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors))
        .with_state(state);

    // Start server with graceful shutdown
    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = worker_handle {
        info!("Draining reconciliation queue...");
        match tokio::time::timeout(DRAIN_TIMEOUT, handle).await {
            Ok(Ok(())) => info!("Reconciliation queue drained"),
            Ok(Err(e)) => error!(error = %e, "Reconciliation worker panicked"),
            Err(_) => warn!("Reconciliation queue not drained before timeout"),
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
