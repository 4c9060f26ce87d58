//! # purgehubd: purgehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and initialise logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository and provider implementations (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Ensure the bootstrap operator account exists
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use purgehub_adapter_edgeone::EdgeOneClient;
use purgehub_adapter_http_axum::router;
use purgehub_adapter_http_axum::state::AppState;
use purgehub_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteConfigRepository, SqliteUserRepository,
};
use purgehub_app::services::auth_service::AuthService;
use purgehub_app::services::config_service::ConfigService;
use purgehub_app::services::purge_service::PurgeService;
use purgehub_app::session_store::InMemorySessionStore;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();
    tracing::debug!(?config, "configuration loaded");

    // Database
    let db = StorageConfig {
        database_url: config.database.url.clone(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let config_repo = Arc::new(SqliteConfigRepository::new(pool.clone()));
    let user_repo = SqliteUserRepository::new(pool);

    // Provider
    let provider = EdgeOneClient::with_endpoint(
        &config.edgeone.endpoint,
        Duration::from_secs(config.edgeone.timeout_secs),
    )?;

    // Services
    let sessions = InMemorySessionStore::new(Duration::from_secs(config.auth.session_ttl_secs));
    let auth_service = AuthService::new(user_repo, sessions);
    auth_service
        .ensure_user(&config.auth.admin_username, &config.auth.admin_password)
        .await?;
    let config_service = ConfigService::new(Arc::clone(&config_repo));
    let purge_service = PurgeService::new(config_repo, provider);

    // HTTP
    let state = AppState::new(
        config_service,
        purge_service,
        auth_service,
        &config.dashboard.assets_dir,
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, assets = %config.dashboard.assets_dir, "purgehubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("purgehubd stopped");
    Ok(())
}

/// Resolve on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "cannot listen for ctrl-c");
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
                tracing::error!(%err, "cannot listen for SIGTERM");
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
