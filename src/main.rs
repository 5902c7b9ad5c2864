//! teamavail-history server entry point.
//!
//! Creates the `history` table, then starts the Axum HTTP server. A
//! failed table initialization ends the process with a non-zero status
//! before the listener binds.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use teamavail_history::api;
use teamavail_history::app_state::AppState;
use teamavail_history::config::AppConfig;
use teamavail_history::persistence::{HistoryStore, PostgresHistoryStore, pool};
use teamavail_history::service::HistoryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        addr = %config.listen_addr,
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.name,
        "starting teamavail-history"
    );

    // Build persistence layer
    let store = Arc::new(PostgresHistoryStore::new(pool::connect_lazy(
        &config.database,
    )));
    let history = Arc::new(HistoryService::with_tracing(
        Arc::clone(&store) as Arc<dyn HistoryStore>,
    ));

    history
        .initialize()
        .await
        .context("failed to initialize database")?;

    // Build router
    let app = api::app(AppState::new(history), &config.assets);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("server stopped");

    Ok(())
}

/// Installs the global subscriber. `LOG_FORMAT=json` selects JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
