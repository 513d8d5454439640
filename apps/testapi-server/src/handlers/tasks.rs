//! # Task Handlers
//!
//! The to-do list. It is small, so listing returns every task unpaged.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use testapi_core::requests::{TaskCreate, TaskUpdate};
use testapi_core::{CoreError, Task};
use tracing::debug;

use crate::error::{ApiResult, ErrorBody};
use crate::extract::{parse_id, JsonBody};
use crate::state::AppState;

fn not_found(id: i64) -> CoreError {
    CoreError::not_found(format!("Task with id {} not found", id))
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses((status = 200, description = "All tasks", body = [Task])),
    tag = "tasks"
)]
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    debug!("list_tasks");
    Json(state.store.tasks().all())
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "The task", body = Task),
        (status = 404, description = "Task not found", body = ErrorBody)
    ),
    tag = "tasks"
)]
pub async fn get_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Task>> {
    let id = parse_id(&id, "id")?;
    debug!(id, "get_task");

    let task = state.store.tasks().get(id).ok_or_else(|| not_found(id))?;
    Ok(Json(task))
}

/// Creates a task. Keys other than `desc` and `completed` are rejected.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = TaskCreate,
    responses(
        (status = 200, description = "Created task", body = Task),
        (status = 400, description = "Invalid body", body = ErrorBody)
    ),
    tag = "tasks"
)]
pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TaskCreate>,
) -> Json<Task> {
    debug!(desc = %body.desc, "create_task");
    Json(state.store.tasks().create(body))
}

#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    request_body = TaskUpdate,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 404, description = "Task not found", body = ErrorBody)
    ),
    tag = "tasks"
)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    let id = parse_id(&id, "id")?;
    debug!(id, "update_task");

    let task = state
        .store
        .tasks()
        .update(id, body)
        .ok_or_else(|| not_found(id))?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Deleted task", body = Task),
        (status = 204, description = "No task with this id")
    ),
    tag = "tasks"
)]
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let id = parse_id(&id, "id")?;
    debug!(id, "delete_task");

    Ok(match state.store.tasks().delete(id) {
        Some(task) => Json(task).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
