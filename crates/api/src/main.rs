//! HTTP API for gr8life.
//!
//! Serves journal entries, weekly completion, and the identity provider
//! webhook that mirrors users into SQLite.

mod auth;
mod config;
mod error;
mod journal;
mod routes;
mod state;

use database::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting gr8life API");

    if let Some(dir) = config
        .database_url
        .strip_prefix("sqlite:")
        .and_then(|rest| rest.split('?').next())
        .map(std::path::Path::new)
        .and_then(|path| path.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(dir).await?;
    }

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    if config.webhook_secret.is_none() {
        tracing::warn!("IDENTITY_WEBHOOK_SECRET not set; identity webhook deliveries will be refused");
    }

    let state = AppState::new(db, config.webhook_secret);
    let app = routes::router().with_state(state);

    info!(addr = %config.addr, "gr8life API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
