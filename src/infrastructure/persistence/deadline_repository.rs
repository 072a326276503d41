//! Deadline decorator for cart repositories
//!
//! Wraps any full repository and bounds each call with a timeout. On expiry
//! the inner future is dropped and the caller gets `RepositoryError::Timeout`.
//! A write the store already committed before the deadline fired stays
//! committed.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::outbound::{
    CartReadRepositoryPort, CartRepositoryPort, CartWriteRepositoryPort, RepositoryError,
};
use crate::domain::aggregates::Cart;
use crate::domain::entities::CartItem;
use crate::domain::value_objects::{CartId, CartItemId};

pub struct DeadlineCartRepository<R> {
    inner: R,
    timeout: Duration,
}

impl<R> DeadlineCartRepository<R> {
    pub fn new(inner: R, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn within<T, F>(&self, operation: &'static str, fut: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.timeout, "Cart repository call timed out");
                Err(RepositoryError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl<R: CartRepositoryPort> CartWriteRepositoryPort for DeadlineCartRepository<R> {
    async fn create_cart(&self) -> Result<Cart, RepositoryError> {
        self.within("create_cart", self.inner.create_cart()).await
    }

    async fn add_item(
        &self,
        cart_id: CartId,
        product: &str,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        self.within("add_item", self.inner.add_item(cart_id, product, quantity))
            .await
    }

    async fn remove_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        self.within("remove_item", self.inner.remove_item(cart_id, item_id))
            .await
    }

    async fn delete_cart(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        self.within("delete_cart", self.inner.delete_cart(cart_id)).await
    }
}

#[async_trait]
impl<R: CartRepositoryPort> CartReadRepositoryPort for DeadlineCartRepository<R> {
    async fn cart(&self, cart_id: CartId) -> Result<Cart, RepositoryError> {
        self.within("cart", self.inner.cart(cart_id)).await
    }
}
