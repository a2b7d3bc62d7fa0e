//! HTTP server initialization and runtime setup.
//!
//! Opens the store, builds the codec and service, and runs the Axum server
//! until Ctrl-C or SIGTERM.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::infrastructure::persistence::{RedbLinkRepository, RedbStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the application state for a resolved salt.
///
/// Makes the database path absolute, opens (or creates) the database and
/// ensures the namespace exists.
///
/// # Errors
///
/// Returns an error if:
/// - The database path cannot be resolved
/// - The database cannot be opened
/// - The codec configuration is invalid
/// - The namespace cannot be created
pub fn build_state(config: &Config, salt: &str) -> Result<AppState> {
    let db_path = database_path(config)?;
    tracing::info!(path = %db_path.display(), "Opening database");

    let store = RedbStore::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let codec = config.codec(salt).context("Invalid short code configuration")?;
    let codec = Arc::new(codec);

    let namespace = config.namespace_for(salt);
    let link_repository = RedbLinkRepository::new(
        Arc::new(store),
        codec.clone(),
        &namespace,
        config.key_scheme,
    )
    .context("Failed to prepare store namespace")?;

    let link_service = LinkService::new(Arc::new(link_repository), codec, config.key_scheme);

    Ok(AppState::new(Arc::new(link_service)))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Salt generation fails
/// - State construction fails (see [`build_state`])
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let salt = config.resolve_salt()?;
    let state = build_state(&config, &salt)?;

    let issued = state.link_service.issued_count().await?;
    tracing::info!(issued, "Namespace ready");

    let app = app_router(state);

    let listener = bind(&config.listen_addrs()).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Binds the first address that succeeds.
async fn bind(addrs: &[String]) -> Result<TcpListener> {
    let mut last_error = None;

    for addr in addrs {
        match TcpListener::bind(addr.as_str()).await {
            Ok(listener) => return Ok(listener),
            Err(e) => {
                tracing::warn!(addr = %addr, error = %e, "Failed to bind");
                last_error = Some(anyhow::Error::new(e).context(format!("Failed to bind {addr}")));
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No listen address configured")))
}

fn database_path(config: &Config) -> Result<PathBuf> {
    std::path::absolute(&config.db)
        .with_context(|| format!("Failed to resolve database path {}", config.db.display()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}
