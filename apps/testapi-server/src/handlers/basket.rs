//! # Basket Handlers
//!
//! ```text
//! GET    /api/v1/basket/{key}                         → 200 items
//! DELETE /api/v1/basket/{key}[?refill=true]           → 200 previous items
//! POST   /api/v1/basket/{key}/products/{productId}    → 201 items (add/merge)
//! PATCH  /api/v1/basket/{key}/products/{productId}    → 200 items (set)
//! DELETE /api/v1/basket/{key}/products/{productId}    → 200 items
//! ```
//!
//! POST and PATCH look the product up before decoding the body: an unknown
//! or unstocked product is 404/409 whatever the body holds.

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use testapi_core::requests::QuantityRequest;
use testapi_core::{Basket, BasketItem};
use tracing::debug;

use crate::error::{ApiResult, ErrorBody};
use crate::extract::{parse_id, query_flag, RawBody};
use crate::state::AppState;

/// Returns the basket for `key`, creating it on first access.
#[utoipa::path(
    get,
    path = "/api/v1/basket/{key}",
    params(("key" = String, Path, description = "Caller-chosen basket key")),
    responses(
        (status = 200, description = "Basket items", body = [BasketItem]),
        (status = 500, description = "Basket holds more than five items", body = ErrorBody)
    ),
    tag = "basket"
)]
pub async fn get_basket(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<Basket>> {
    debug!(key = %key, "get_basket");
    Ok(Json(state.basket_service().get_basket(&key)?))
}

/// Empties the basket and returns what it held.
#[utoipa::path(
    delete,
    path = "/api/v1/basket/{key}",
    params(
        ("key" = String, Path, description = "Caller-chosen basket key"),
        ("refill" = Option<bool>, Query, description = "Re-seed the two default items")
    ),
    responses((status = 200, description = "Items removed from the basket", body = [BasketItem])),
    tag = "basket"
)]
pub async fn clear_basket(
    State(state): State<AppState>,
    Path(key): Path<String>,
    uri: Uri,
) -> ApiResult<Json<Basket>> {
    let refill = query_flag(&uri, "refill")?;
    debug!(key = %key, refill, "clear_basket");
    Ok(Json(state.basket_service().clear_basket(&key, refill)?))
}

/// Adds a product, merging with an existing line.
#[utoipa::path(
    post,
    path = "/api/v1/basket/{key}/products/{productId}",
    params(
        ("key" = String, Path, description = "Caller-chosen basket key"),
        ("productId" = i64, Path, description = "Product to add")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 201, description = "Updated basket", body = [BasketItem]),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 409, description = "Product not in stock", body = ErrorBody)
    ),
    tag = "basket"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path((key, product_id)): Path<(String, String)>,
    body: RawBody,
) -> ApiResult<(StatusCode, Json<Basket>)> {
    let product_id = parse_id(&product_id, "productId")?;
    let service = state.basket_service();
    service.check_product(product_id)?;

    let body: QuantityRequest = body.decode()?;
    debug!(key = %key, product_id, quantity = body.quantity, "add_item");

    let basket = service.add_or_merge_item(&key, product_id, body.quantity)?;
    Ok((StatusCode::CREATED, Json(basket)))
}

/// Sets the absolute quantity of a product; 0 removes it.
#[utoipa::path(
    patch,
    path = "/api/v1/basket/{key}/products/{productId}",
    params(
        ("key" = String, Path, description = "Caller-chosen basket key"),
        ("productId" = i64, Path, description = "Product to update")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Updated basket", body = [BasketItem]),
        (status = 400, description = "Invalid body or negative quantity", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 409, description = "Product not in stock", body = ErrorBody)
    ),
    tag = "basket"
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    Path((key, product_id)): Path<(String, String)>,
    body: RawBody,
) -> ApiResult<Json<Basket>> {
    let product_id = parse_id(&product_id, "productId")?;
    let service = state.basket_service();
    service.check_product(product_id)?;

    let body: QuantityRequest = body.decode()?;
    debug!(key = %key, product_id, quantity = body.quantity, "set_quantity");

    let basket = service.set_quantity(&key, product_id, body.quantity)?;
    Ok(Json(basket))
}

/// Removes a product line from the basket.
#[utoipa::path(
    delete,
    path = "/api/v1/basket/{key}/products/{productId}",
    params(
        ("key" = String, Path, description = "Caller-chosen basket key"),
        ("productId" = i64, Path, description = "Product to remove")
    ),
    responses(
        (status = 200, description = "Updated basket", body = [BasketItem]),
        (status = 404, description = "Product not in basket", body = ErrorBody)
    ),
    tag = "basket"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((key, product_id)): Path<(String, String)>,
) -> ApiResult<Json<Basket>> {
    let product_id = parse_id(&product_id, "productId")?;
    debug!(key = %key, product_id, "remove_item");
    Ok(Json(state.basket_service().remove_item(&key, product_id)?))
}
