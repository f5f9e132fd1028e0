use anyhow::Context;
use tracing_subscriber::EnvFilter;

use recruiter_portal::database::DatabaseManager;
use recruiter_portal::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, ADMIN_MAINT_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().clone();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting Recruiter Portal in {:?} mode", config.environment);

    if config.security.admin_maint_key.is_none() {
        tracing::warn!(
            "ADMIN_MAINT_KEY is not set; admin routes use the {:?} gate policy",
            config.security.admin_gate_policy
        );
    }

    // Lazy so the server can start (and report degraded health) before the database is up
    let pool = DatabaseManager::connect_lazy(&config.database).context("failed to create database pool")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::from_pool(config, pool.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Recruiter Portal listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
