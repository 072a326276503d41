//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Where carts are stored
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage backend: "memory" or "sqlite"
    pub backend: String,
    /// SQLite connection string
    pub database_url: String,
    /// SQLite pool size
    pub max_connections: u32,
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP bind address
    pub host: String,
    /// HTTP port
    pub port: u16,

    pub storage: StorageConfig,

    /// Deadline applied to every repository call
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080")
                .parse()
                .context("PORT must be a valid port number")?,

            storage: StorageConfig {
                backend: var("STORAGE_BACKEND", "sqlite"),
                database_url: var("DATABASE_URL", "sqlite://carts.db"),
                max_connections: var("DATABASE_MAX_CONNECTIONS", "5")
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            },

            request_timeout: Duration::from_millis(
                var("REQUEST_TIMEOUT_MS", "5000")
                    .parse()
                    .context("REQUEST_TIMEOUT_MS must be a number of milliseconds")?,
            ),
        })
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
