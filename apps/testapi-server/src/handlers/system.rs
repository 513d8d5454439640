//! System maintenance endpoint.

use axum::extract::State;
use axum::Json;
use testapi_core::Message;
use tracing::info;

use crate::state::AppState;

/// Regenerates products, users and tasks. Baskets are kept.
#[utoipa::path(
    delete,
    path = "/api/v1/system",
    responses((status = 200, description = "Data regenerated", body = Message)),
    tag = "system"
)]
pub async fn reset_system(State(state): State<AppState>) -> Json<Message> {
    info!("System reset requested");
    state.store.regenerate();
    Json(Message {
        message: "Tasks, Product and User are (re)generated.".to_string(),
    })
}
