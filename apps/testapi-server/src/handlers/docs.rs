//! Serves the generated OpenAPI document.

use axum::Json;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;

/// `GET /api/v1/swagger.json`
pub async fn swagger_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
