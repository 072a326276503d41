//! Cart store factory - Creates the repository backend named in configuration
//!
//! The backend is chosen at runtime ("memory" or "sqlite") and wrapped in an
//! enum so callers keep a single concrete type.

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::ports::outbound::{
    CartReadRepositoryPort, CartWriteRepositoryPort, RepositoryError,
};
use crate::domain::aggregates::Cart;
use crate::domain::entities::CartItem;
use crate::domain::value_objects::{CartId, CartItemId};
use crate::infrastructure::config::StorageConfig;
use crate::infrastructure::persistence::{InMemoryCartRepository, SqliteCartRepository};

/// Enum wrapper for cart store backends to enable runtime selection
pub enum CartStoreBackend {
    Memory(InMemoryCartRepository),
    Sqlite(SqliteCartRepository),
}

impl CartStoreBackend {
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        match config.backend.as_str() {
            "memory" => {
                tracing::warn!("Using in-memory cart store; carts are lost on restart");
                Ok(CartStoreBackend::Memory(InMemoryCartRepository::new()))
            }
            "sqlite" => {
                let repo =
                    SqliteCartRepository::connect(&config.database_url, config.max_connections)
                        .await
                        .with_context(|| {
                            format!("Failed to open SQLite cart store at {}", config.database_url)
                        })?;
                Ok(CartStoreBackend::Sqlite(repo))
            }
            backend => anyhow::bail!("Unsupported storage backend: {}", backend),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CartStoreBackend::Memory(_) => "memory",
            CartStoreBackend::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait]
impl CartWriteRepositoryPort for CartStoreBackend {
    async fn create_cart(&self) -> Result<Cart, RepositoryError> {
        match self {
            CartStoreBackend::Memory(r) => r.create_cart().await,
            CartStoreBackend::Sqlite(r) => r.create_cart().await,
        }
    }

    async fn add_item(
        &self,
        cart_id: CartId,
        product: &str,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        match self {
            CartStoreBackend::Memory(r) => r.add_item(cart_id, product, quantity).await,
            CartStoreBackend::Sqlite(r) => r.add_item(cart_id, product, quantity).await,
        }
    }

    async fn remove_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        match self {
            CartStoreBackend::Memory(r) => r.remove_item(cart_id, item_id).await,
            CartStoreBackend::Sqlite(r) => r.remove_item(cart_id, item_id).await,
        }
    }

    async fn delete_cart(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        match self {
            CartStoreBackend::Memory(r) => r.delete_cart(cart_id).await,
            CartStoreBackend::Sqlite(r) => r.delete_cart(cart_id).await,
        }
    }
}

#[async_trait]
impl CartReadRepositoryPort for CartStoreBackend {
    async fn cart(&self, cart_id: CartId) -> Result<Cart, RepositoryError> {
        match self {
            CartStoreBackend::Memory(r) => r.cart(cart_id).await,
            CartStoreBackend::Sqlite(r) => r.cart(cart_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(backend: &str, database_url: &str) -> StorageConfig {
        StorageConfig {
            backend: backend.to_string(),
            database_url: database_url.to_string(),
            max_connections: 1,
        }
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let backend = CartStoreBackend::from_config(&storage("memory", ""))
            .await
            .unwrap();
        assert_eq!(backend.name(), "memory");

        let cart = backend.create_cart().await.unwrap();
        backend.add_item(cart.id(), "Shoes", 1).await.unwrap();
        assert_eq!(backend.cart(cart.id()).await.unwrap().items().len(), 1);
    }

    #[tokio::test]
    async fn test_sqlite_backend() {
        let backend = CartStoreBackend::from_config(&storage("sqlite", "sqlite::memory:"))
            .await
            .unwrap();
        assert_eq!(backend.name(), "sqlite");

        let cart = backend.create_cart().await.unwrap();
        assert!(backend.cart(cart.id()).await.unwrap().items().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let result = CartStoreBackend::from_config(&storage("mongo", "")).await;
        assert!(result.is_err());
    }
}
