//! HTTP REST API routes

mod cart_routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/heartbeat", get(cart_routes::heartbeat))
        // Cart routes
        .route("/carts", post(cart_routes::create_cart))
        .route("/carts/{id}", get(cart_routes::get_cart))
        .route("/carts/{id}", delete(cart_routes::delete_cart))
        // Item routes
        .route("/carts/{id}/items", post(cart_routes::add_item))
        .route(
            "/carts/{id}/items/{item_id}",
            delete(cart_routes::remove_item),
        )
}
