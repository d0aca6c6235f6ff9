use service_core::observability::init_tracing;
use std::sync::Arc;
use std::time::Duration;
use takmir_frontend::config::{get_configuration, DraftSettings};
use takmir_frontend::services::backend_client::BackendClient;
use takmir_frontend::services::draft_store::{
    DraftDebouncer, DraftStore, FileDraftStore, MemoryDraftStore,
};
use takmir_frontend::startup::build_router;
use takmir_frontend::AppState;
use tokio::signal;
use tracing::info;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

fn draft_store(settings: &DraftSettings) -> Arc<dyn DraftStore> {
    match &settings.directory {
        Some(directory) => {
            info!(directory = %directory, "Using file draft store");
            Arc::new(FileDraftStore::new(directory))
        }
        None => {
            info!("Using in-memory draft store");
            Arc::new(MemoryDraftStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "takmir-frontend",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    );

    takmir_frontend::services::metrics::init_metrics()
        .map_err(|e| anyhow::anyhow!("Failed to register metrics: {}", e))?;

    let backend = BackendClient::new(configuration.backend.clone())
        .map_err(|e| anyhow::anyhow!("Failed to build backend client: {}", e))?;

    let drafts = Arc::new(DraftDebouncer::new(
        draft_store(&configuration.drafts),
        Duration::from_millis(configuration.drafts.debounce_ms),
    ));

    let state = AppState::new(Arc::new(backend), drafts.clone());
    let app = build_router(state);

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting takmir-frontend on {}", address
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            anyhow::anyhow!("Server error: {}", e)
        })?;

    if let Err(e) = drafts.flush().await {
        tracing::error!(error = %e, "Failed to flush pending drafts on shutdown");
    }

    info!("takmir-frontend stopped");
    Ok(())
}
