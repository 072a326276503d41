//! Cart Service - HTTP API for shopping cart aggregates
//!
//! The service:
//! - Keeps carts and their line items in a pluggable store (SQLite or memory)
//! - Validates line items inside the Cart aggregate before anything is stored
//! - Exposes create/fetch/delete cart and add/remove item over REST

mod application;
mod domain;
mod infrastructure;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

/// Create, update and delete shopping carts over HTTP
#[derive(Debug, Parser)]
#[command(name = "cart-service", version)]
struct Cli {
    /// Path to .env config file
    #[arg(short, long, default_value = "./config/.env")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables from the .env file, if present
    let env_file = dotenvy::from_path(&cli.config);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cart_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cart Service");
    if let Err(e) = env_file {
        tracing::debug!("No env file loaded from {}: {}", cli.config.display(), e);
    }

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Storage: {}", config.storage.backend);
    tracing::info!("  Request timeout: {:?}", config.request_timeout);

    // Initialize application state
    let state = Arc::new(AppState::new(config).await?);
    let addr = state.config.bind_address();
    tracing::info!("Application state initialized");

    // Build the router
    let app: Router = http::create_routes()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
