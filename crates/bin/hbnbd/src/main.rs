//! # hbnbd: hbnb review API daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`hbnb.toml`, env vars)
//! - Install the `tracing` subscriber
//! - Open the configured storage backend (JSON file or `SQLite`)
//! - Construct application services, injecting storage via port traits
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hbnb_adapter_http_axum::router;
use hbnb_adapter_http_axum::state::AppState;
use hbnb_adapter_storage_sqlite_sqlx::SqliteStorage;
use hbnb_app::ports::Storage;

use crate::config::{Config, StorageKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match config.storage.kind {
        StorageKind::File => {
            let storage = hbnb_adapter_storage_file::Config {
                path: config.storage.file_path.clone(),
            }
            .build()
            .await
            .context("failed to open file storage")?;
            serve(&config, storage).await
        }
        StorageKind::Db => {
            let db = hbnb_adapter_storage_sqlite_sqlx::Config {
                database_url: config.storage.database_url.clone(),
            }
            .build()
            .await
            .context("failed to open sqlite storage")?;
            serve(&config, SqliteStorage::new(db.pool().clone())).await
        }
    }
}

async fn serve<S: Storage + Clone>(config: &Config, storage: S) -> anyhow::Result<()> {
    let app = router::build(AppState::from_storage(storage));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        storage = ?config.storage.kind,
        "hbnbd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("hbnbd stopped");
    Ok(())
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
