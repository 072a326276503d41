//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Aggregates: the Cart aggregate root
//! - Entities: CartItem
//! - Value Objects: typed identifiers
//! - Errors: the domain error vocabulary

pub mod aggregates;
pub mod entities;
pub mod errors;
pub mod value_objects;
