//! Cart Service - Application service for cart management
//!
//! Holds a write-capable repository and a read-only repository separately, so
//! a deployment can back them with different handles.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{
    CartReadRepositoryPort, CartWriteRepositoryPort, RepositoryError,
};
use crate::domain::aggregates::Cart;
use crate::domain::entities::CartItem;
use crate::domain::value_objects::{CartId, CartItemId};

#[derive(Clone)]
pub struct CartService {
    write: Arc<dyn CartWriteRepositoryPort>,
    read: Arc<dyn CartReadRepositoryPort>,
}

impl CartService {
    pub fn new(
        write: Arc<dyn CartWriteRepositoryPort>,
        read: Arc<dyn CartReadRepositoryPort>,
    ) -> Self {
        Self { write, read }
    }

    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<Cart, RepositoryError> {
        let cart = self.write.create_cart().await?;
        info!(cart_id = %cart.id(), "Created cart");
        Ok(cart)
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, cart_id: CartId) -> Result<Cart, RepositoryError> {
        debug!(cart_id = %cart_id, "Fetching cart");
        self.read.cart(cart_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_cart(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        self.write.delete_cart(cart_id).await?;
        info!(cart_id = %cart_id, "Deleted cart");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product: &str,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        let item = self.write.add_item(cart_id, product, quantity).await?;
        info!(item_id = %item.id, "Added {} x {} to cart", item.quantity, item.product);
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        self.write.remove_item(cart_id, item_id).await?;
        info!(cart_id = %cart_id, item_id = %item_id, "Removed item from cart");
        Ok(())
    }
}
