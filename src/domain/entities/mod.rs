//! Domain entities - Core business objects with identity

mod cart_item;

pub use cart_item::CartItem;
