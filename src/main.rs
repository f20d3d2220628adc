use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cashcard_api::{app, config, database::DatabaseManager, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, STORE_BACKEND, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    tracing::info!("Starting cash card API in {:?} mode", config.environment);

    let repository = DatabaseManager::open(&config.database)
        .await
        .context("failed to open record store")?;

    let state = AppState::new(config, repository).context("failed to load configured users")?;
    if config.security.users.is_empty() {
        tracing::warn!("No users configured (SECURITY_USERS); every request will be rejected");
    } else {
        tracing::info!("Credential gate loaded {} users", config.security.users.len());
    }

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Cash card API listening on http://{}", bind_addr);

    axum::serve(listener, app(config, state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
