//! Cart line item

use serde::{Deserialize, Serialize};

use crate::domain::errors::CartError;
use crate::domain::value_objects::{CartId, CartItemId};

/// A single line of a cart.
///
/// `cart_id` is a denormalized back-reference kept for serialization; the
/// owning cart's item list is what decides membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product: String,
    pub quantity: i64,
}

impl CartItem {
    /// Build a candidate item. Nothing is checked until [`CartItem::validate`].
    pub fn new(id: CartItemId, cart_id: CartId, product: impl Into<String>, quantity: i64) -> Self {
        Self {
            id,
            cart_id,
            product: product.into(),
            quantity,
        }
    }

    /// Check the line item invariants. An empty product is reported before a
    /// zero quantity.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.product.is_empty() {
            return Err(CartError::EmptyProduct);
        }

        if self.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        Ok(())
    }
}
