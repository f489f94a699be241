use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use planvibe_api::config::{AppConfig, ConfigError};
use planvibe_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use planvibe_api::{app, AppState};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "planvibe-api")]
#[command(about = "Task and goal tracking API server")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::info!("Starting PlanVibe API in {:?} mode", config.environment);

    let store = connect_store(&config).await?;
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(config, store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<dyn Store>> {
    if config.database.url.is_some() {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        DatabaseManager::ensure_schema(&pool)
            .await
            .context("failed to prepare database schema")?;
        return Ok(Arc::new(PgStore::new(pool)));
    }

    if config.requires_database() {
        bail!(ConfigError::Missing("DATABASE_URL"));
    }

    tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on exit");
    Ok(Arc::new(MemoryStore::new()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
