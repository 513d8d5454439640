//! # Product Handlers
//!
//! CRUD over the product catalog the basket endpoints check stock against.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use testapi_core::requests::{ProductCreate, ProductUpdate};
use testapi_core::{CoreError, Page, Product};
use tracing::debug;

use crate::error::{ApiResult, ErrorBody};
use crate::extract::{parse_id, JsonBody, ListParams};
use crate::state::AppState;

fn not_found(id: i64) -> CoreError {
    CoreError::not_found(format!("Product with id {} not found", id))
}

/// Lists products a page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(
        ("page" = Option<usize>, Query, description = "Zero-based page index"),
        ("pageSize" = Option<usize>, Query, description = "Items per page (default 20)"),
        ("sortBy" = Option<String>, Query, description = "Field to sort by, '-' prefix for descending")
    ),
    responses(
        (status = 200, description = "One page of products", body = Page<Product>),
        (status = 400, description = "Invalid paging parameters", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> Json<Page<Product>> {
    debug!(page = query.page, page_size = query.page_size, "list_products");
    Json(query.paginate(state.store.products().all()))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id, "id")?;
    debug!(id, "get_product");

    let product = state.store.products().get(id).ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// Creates a product with the next free id.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductCreate,
    responses(
        (status = 200, description = "Created product", body = Product),
        (status = 400, description = "Invalid body", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ProductCreate>,
) -> Json<Product> {
    debug!(sku = %body.sku, "create_product");
    Json(state.store.products().create(body))
}

/// Overwrites the fields present in the body.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    let id = parse_id(&id, "id")?;
    debug!(id, "update_product");

    let product = state
        .store
        .products()
        .update(id, body)
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// Deletes a product; 204 when there was nothing to delete.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted product", body = Product),
        (status = 204, description = "No product with this id")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id, "id")?;
    debug!(id, "delete_product");

    Ok(match state.store.products().delete(id) {
        Some(product) => Json(product).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
