//! Cart API routes

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::ports::outbound::RepositoryError;
use crate::domain::aggregates::Cart;
use crate::domain::entities::CartItem;
use crate::domain::value_objects::{CartId, CartItemId};
use crate::infrastructure::state::AppState;

/// Request to add an item. Missing fields fall through to domain validation.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub id: String,
    pub cart_id: String,
    pub product: String,
    pub quantity: i64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            cart_id: item.cart_id.to_string(),
            product: item.product,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub id: String,
    pub items: Vec<CartItemResponse>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id().to_string(),
            items: cart
                .items()
                .iter()
                .cloned()
                .map(CartItemResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    pub result: &'static str,
}

/// Body of successful calls that return nothing
#[derive(Debug, Serialize)]
pub struct EmptyResponse {}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Domain refusals are the caller's fault; everything else is ours
fn repository_error(e: RepositoryError) -> ApiError {
    let status = match &e {
        RepositoryError::Domain(_) => StatusCode::BAD_REQUEST,
        RepositoryError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        RepositoryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("Cart request failed: {}", e);
    }
    api_error(status, e.to_string())
}

fn parse_cart_id(id: &str) -> Result<CartId, ApiError> {
    id.parse()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid cart ID"))
}

fn parse_item_id(id: &str) -> Result<CartItemId, ApiError> {
    id.parse()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid cart item ID"))
}

/// Liveness probe
pub async fn heartbeat() -> Json<HeartbeatResponse> {
    Json(HeartbeatResponse { result: "OK" })
}

/// Create an empty cart. Any failure is reported as a bad request.
pub async fn create_cart(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .cart_service
        .create_cart()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(CartResponse::from(cart)))
}

/// Get a cart by ID
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart_id = parse_cart_id(&id)?;

    let cart = state
        .cart_service
        .get_cart(cart_id)
        .await
        .map_err(repository_error)?;

    Ok(Json(CartResponse::from(cart)))
}

/// Delete a cart with all its items
pub async fn delete_cart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EmptyResponse>, ApiError> {
    let cart_id = parse_cart_id(&id)?;

    state
        .cart_service
        .delete_cart(cart_id)
        .await
        .map_err(repository_error)?;

    Ok(Json(EmptyResponse {}))
}

/// Add an item to a cart
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<CartItemResponse>, ApiError> {
    let req: AddItemRequest = serde_json::from_slice(&body)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    let cart_id = parse_cart_id(&id)?;

    let item = state
        .cart_service
        .add_item(cart_id, &req.product, req.quantity)
        .await
        .map_err(repository_error)?;

    Ok(Json(CartItemResponse::from(item)))
}

/// Remove an item from a cart
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<Json<EmptyResponse>, ApiError> {
    let cart_id = parse_cart_id(&id)?;
    let item_id = parse_item_id(&item_id)?;

    state
        .cart_service
        .remove_item(cart_id, item_id)
        .await
        .map_err(repository_error)?;

    Ok(Json(EmptyResponse {}))
}
