//! Cart persistence adapters
//!
//! Every adapter here implements both cart repository ports with the same
//! error vocabulary, so the HTTP layer behaves identically on any of them.

mod deadline_repository;
mod factory;
mod memory_cart_repository;
mod sqlite_cart_repository;

#[cfg(test)]
pub(crate) mod contract_tests;

pub use deadline_repository::DeadlineCartRepository;
pub use factory::CartStoreBackend;
pub use memory_cart_repository::InMemoryCartRepository;
pub use sqlite_cart_repository::SqliteCartRepository;
