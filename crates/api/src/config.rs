//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Shared secret expected in `x-webhook-secret` on identity webhooks.
    pub webhook_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GR8LIFE_API_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite path or URL | `./data/gr8life.db` |
    /// | `IDENTITY_WEBHOOK_SECRET` | Webhook shared secret | (unset: unchecked) |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("GR8LIFE_API_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = sqlite_url_from_path(
            &env::var("SQLITE_PATH").unwrap_or_else(|_| "./data/gr8life.db".to_string()),
        );

        let webhook_secret = env::var("IDENTITY_WEBHOOK_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty());

        Ok(Self {
            addr,
            database_url,
            webhook_secret,
        })
    }
}

fn sqlite_url_from_path(path: &str) -> String {
    if path.starts_with("sqlite:") {
        path.to_string()
    } else {
        format!("sqlite:{}?mode=rwc", path)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid GR8LIFE_API_ADDR format")]
    InvalidAddr,
}
