//! Outbound ports - Interfaces that the application requires from external systems

mod cart_repository_port;

pub use cart_repository_port::{
    CartReadRepositoryPort, CartRepositoryPort, CartWriteRepositoryPort, RepositoryError,
};
