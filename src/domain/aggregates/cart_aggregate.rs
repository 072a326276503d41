//! Cart Aggregate - A cart and its ordered line items
//!
//! Every change to a cart's items goes through this aggregate root so that
//! line item validation happens before anything is attached.

use serde::Serialize;

use crate::domain::entities::CartItem;
use crate::domain::errors::CartError;
use crate::domain::value_objects::{CartId, CartItemId};

/// The Cart Aggregate Root
///
/// Items are kept in the order they were added. Mutation requires `&mut self`,
/// so concurrent writers must go through a repository that serializes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    id: CartId,
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart with the given identity
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    /// Load items into the aggregate (for hydration from persistence).
    ///
    /// Stored items are trusted as they were validated on the write path.
    pub fn with_items(mut self, items: Vec<CartItem>) -> Self {
        self.items = items;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Find an item by ID
    pub fn find_item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Add a line item bound to this cart.
    ///
    /// # Invariants
    /// - Product must not be empty
    /// - Quantity must not be zero
    ///
    /// On error the item list is left untouched.
    pub fn add_item(
        &mut self,
        id: CartItemId,
        product: impl Into<String>,
        quantity: i64,
    ) -> Result<CartItem, CartError> {
        let item = CartItem::new(id, self.id, product, quantity);
        item.validate()?;

        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove the first item with the given ID, keeping the order of the rest
    pub fn remove_item(&mut self, id: CartItemId) -> Result<CartItem, CartError> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CartError::NoSuchCartItem)?;

        Ok(self.items.remove(pos))
    }
}
