//! Aggregates - Cluster of domain objects treated as a single unit

pub mod cart_aggregate;

pub use cart_aggregate::Cart;
