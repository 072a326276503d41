//! Cart repository ports - Interfaces for cart persistence
//!
//! The contract is split into a read-only capability and a write capability so
//! that components which must never mutate carts can be handed only the
//! former. Adapters implement both; `CartRepositoryPort` comes for free.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::aggregates::Cart;
use crate::domain::entities::CartItem;
use crate::domain::errors::CartError;
use crate::domain::value_objects::{CartId, CartItemId};

/// Errors surfaced by any cart repository adapter
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// One of the four domain refusals, passed through unchanged
    #[error(transparent)]
    Domain(#[from] CartError),
    /// The caller's deadline expired before the store answered
    #[error("repository call timed out after {0:?}")]
    Timeout(Duration),
    /// Any other storage failure. Not assumed to be retryable.
    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
impl RepositoryError {
    /// The domain kind behind this error, if there is one
    pub fn domain(&self) -> Option<CartError> {
        match self {
            RepositoryError::Domain(e) => Some(*e),
            _ => None,
        }
    }
}

/// Write capability over cart aggregates.
///
/// Every method is atomic with respect to other calls on the same cart.
#[async_trait]
pub trait CartWriteRepositoryPort: Send + Sync {
    /// Allocate a fresh identifier and persist an empty cart
    async fn create_cart(&self) -> Result<Cart, RepositoryError>;

    /// Validate and append a line item to an existing cart
    async fn add_item(
        &self,
        cart_id: CartId,
        product: &str,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError>;

    /// Remove a line item from an existing cart
    async fn remove_item(&self, cart_id: CartId, item_id: CartItemId)
        -> Result<(), RepositoryError>;

    /// Permanently delete a cart with all of its items
    async fn delete_cart(&self, cart_id: CartId) -> Result<(), RepositoryError>;
}

/// Read-only capability over cart aggregates
#[async_trait]
pub trait CartReadRepositoryPort: Send + Sync {
    /// Fetch the full current aggregate
    async fn cart(&self, cart_id: CartId) -> Result<Cart, RepositoryError>;
}

/// A repository capable of reading and writing
pub trait CartRepositoryPort: CartWriteRepositoryPort + CartReadRepositoryPort {}

impl<T> CartRepositoryPort for T where T: CartWriteRepositoryPort + CartReadRepositoryPort {}
