//! In-memory cart repository
//!
//! Carts live in a map owned by the repository instance. Each write holds the
//! write lock for its whole read-modify-write, which makes every operation
//! atomic per cart (and, as a side effect, across carts).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    CartReadRepositoryPort, CartWriteRepositoryPort, RepositoryError,
};
use crate::domain::aggregates::Cart;
use crate::domain::entities::CartItem;
use crate::domain::errors::CartError;
use crate::domain::value_objects::{CartId, CartItemId};

#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<HashMap<CartId, Cart>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartWriteRepositoryPort for InMemoryCartRepository {
    async fn create_cart(&self) -> Result<Cart, RepositoryError> {
        let mut carts = self.carts.write().await;

        let mut id = CartId::new();
        while carts.contains_key(&id) {
            id = CartId::new();
        }

        let cart = Cart::new(id);
        carts.insert(id, cart.clone());

        tracing::debug!(cart_id = %id, "Created cart in memory");
        Ok(cart)
    }

    async fn add_item(
        &self,
        cart_id: CartId,
        product: &str,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        let mut carts = self.carts.write().await;
        let cart = carts.get_mut(&cart_id).ok_or(CartError::CartNotFound)?;

        let mut item_id = CartItemId::new();
        while cart.find_item(item_id).is_some() {
            item_id = CartItemId::new();
        }

        let item = cart.add_item(item_id, product, quantity)?;

        tracing::debug!(cart_id = %cart_id, item_id = %item.id, "Added item to cart in memory");
        Ok(item)
    }

    async fn remove_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        let mut carts = self.carts.write().await;
        let cart = carts.get_mut(&cart_id).ok_or(CartError::CartNotFound)?;

        cart.remove_item(item_id)?;

        tracing::debug!(cart_id = %cart_id, item_id = %item_id, "Removed item from cart in memory");
        Ok(())
    }

    async fn delete_cart(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        self.carts
            .write()
            .await
            .remove(&cart_id)
            .ok_or(CartError::CartNotFound)?;

        tracing::debug!(cart_id = %cart_id, "Deleted cart from memory");
        Ok(())
    }
}

#[async_trait]
impl CartReadRepositoryPort for InMemoryCartRepository {
    async fn cart(&self, cart_id: CartId) -> Result<Cart, RepositoryError> {
        let carts = self.carts.read().await;
        let cart = carts.get(&cart_id).ok_or(CartError::CartNotFound)?;
        Ok(cart.clone())
    }
}
