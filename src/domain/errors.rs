//! Domain error vocabulary shared by the aggregate and every repository adapter

use thiserror::Error;

/// The four ways a cart operation can be refused.
///
/// Validation kinds (`EmptyProduct`, `ZeroQuantity`) are raised by the domain
/// model before anything is persisted. Lookup kinds (`CartNotFound`,
/// `NoSuchCartItem`) are raised against current state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    #[error("no such cart")]
    CartNotFound,

    #[error("this cart doesn't contain such item")]
    NoSuchCartItem,

    #[error("product quantity can not be 0")]
    ZeroQuantity,

    #[error("product can not be empty")]
    EmptyProduct,
}
