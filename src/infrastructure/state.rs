//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::CartService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{CartStoreBackend, DeadlineCartRepository};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub cart_service: CartService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize the configured cart store
        let backend = CartStoreBackend::from_config(&config.storage).await?;
        tracing::info!("  Storage backend: {}", backend.name());

        // Every repository call is bounded by the request timeout
        let repository = Arc::new(DeadlineCartRepository::new(backend, config.request_timeout));

        // The same store serves both capabilities
        let cart_service = CartService::new(repository.clone(), repository);

        Ok(Self::from_parts(config, cart_service))
    }

    pub fn from_parts(config: AppConfig, cart_service: CartService) -> Self {
        Self {
            config,
            cart_service,
        }
    }
}
