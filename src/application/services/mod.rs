//! Application services - Use case implementations

pub mod cart_service;

pub use cart_service::CartService;
