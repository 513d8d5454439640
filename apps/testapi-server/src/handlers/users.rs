//! # User Handlers
//!
//! ```text
//! GET    /api/v1/users?page&pageSize&sortBy   → 200 Page<User>
//! GET    /api/v1/users/{id}                   → 200 / 404
//! POST   /api/v1/users                        → 200 created user
//! PUT    /api/v1/users/{id}                   → 200 / 404 (strict partial body)
//! DELETE /api/v1/users/{id}                   → 200 / 204
//! ```
//!
//! Age must stay within 18..=80 and email must look like an address, on
//! create and on every update that sends them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use testapi_core::requests::{UserCreate, UserUpdate};
use testapi_core::{CoreError, Page, User};
use tracing::debug;

use crate::error::{ApiResult, ErrorBody};
use crate::extract::{parse_id, JsonBody, ListParams};
use crate::state::AppState;

fn not_found(id: i64) -> CoreError {
    CoreError::not_found(format!("User with id {} not found", id))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(
        ("page" = Option<usize>, Query, description = "Zero-based page index"),
        ("pageSize" = Option<usize>, Query, description = "Items per page (default 20)"),
        ("sortBy" = Option<String>, Query, description = "Field to sort by, '-' prefix for descending")
    ),
    responses(
        (status = 200, description = "One page of users", body = Page<User>),
        (status = 400, description = "Invalid paging parameters", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>, ListParams(query): ListParams) -> Json<Page<User>> {
    debug!(page = query.page, page_size = query.page_size, "list_users");
    Json(query.paginate(state.store.users().all()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<User>> {
    let id = parse_id(&id, "id")?;
    debug!(id, "get_user");

    let user = state.store.users().get(id).ok_or_else(|| not_found(id))?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserCreate,
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 400, description = "Invalid body", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserCreate>,
) -> Json<User> {
    debug!(email = %body.email, "create_user");
    Json(state.store.users().create(body))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UserUpdate>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id, "id")?;
    debug!(id, "update_user");

    let user = state
        .store
        .users()
        .update(id, body)
        .ok_or_else(|| not_found(id))?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted user", body = User),
        (status = 204, description = "No user with this id")
    ),
    tag = "users"
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let id = parse_id(&id, "id")?;
    debug!(id, "delete_user");

    Ok(match state.store.users().delete(id) {
        Some(user) => Json(user).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
