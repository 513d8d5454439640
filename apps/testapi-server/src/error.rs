//! # API Error Mapping
//!
//! Renders every domain error as an HTTP response. Handlers return
//! `Result<_, ApiError>` and never build error bodies themselves.
//!
//! ## Mapping
//! ```text
//! ┌──────────────┬────────┬───────────────────────────────────────────────┐
//! │ CoreError    │ Status │ Body                                          │
//! ├──────────────┼────────┼───────────────────────────────────────────────┤
//! │ NotFound     │ 404    │ { error: "NotFound", message }                │
//! │ Conflict     │ 409    │ { error: "Conflict", code, message }          │
//! │ BadRequest   │ 400    │ { error: "BadRequest", message, errors? }     │
//! │ Validation   │ 400    │ { error: "BadRequest",                        │
//! │              │        │   message: "one or more fields are invalid",  │
//! │              │        │   errors: [{ key, message }] }                │
//! │ Internal     │ 500    │ { error: "InternalServerError",               │
//! │              │        │   message, details }                          │
//! └──────────────┴────────┴───────────────────────────────────────────────┘
//! ```
//!
//! Panics never reach this mapping; the catch-panic layer answers them with
//! a bare 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use testapi_core::{CoreError, FieldError, ValidationError};
use tracing::{error, warn};
use utoipa::ToSchema;

/// Error response body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Error kind: NotFound, Conflict, BadRequest or InternalServerError.
    pub error: String,

    /// Business code, only on conflicts (e.g. "1202").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub message: String,

    /// Per-field problems, only on 400s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,

    /// Diagnostic detail, only on 500s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    fn new(error: &str, message: String) -> Self {
        ErrorBody {
            error: error.to_string(),
            code: None,
            message,
            errors: None,
            details: None,
        }
    }
}

/// A domain error on its way out as an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub CoreError);

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError(CoreError::Validation(errors))
    }
}

/// Convenience type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Status and body for the wrapped error.
    pub fn to_parts(&self) -> (StatusCode, ErrorBody) {
        match &self.0 {
            CoreError::NotFound { message } => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("NotFound", message.clone()),
            ),
            CoreError::Conflict { code, message } => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: Some(code.clone()),
                    ..ErrorBody::new("Conflict", message.clone())
                },
            ),
            CoreError::BadRequest { message, errors } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    errors: (!errors.is_empty()).then(|| errors.clone()),
                    ..ErrorBody::new("BadRequest", message.clone())
                },
            ),
            CoreError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    errors: Some(errors.iter().map(ValidationError::to_field_error).collect()),
                    ..ErrorBody::new("BadRequest", self.0.to_string())
                },
            ),
            CoreError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    details: Some(details.clone()),
                    ..ErrorBody::new("InternalServerError", message.clone())
                },
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();

        if status.is_server_error() {
            error!(status = status.as_u16(), message = %body.message, "Request failed");
        } else {
            warn!(
                status = status.as_u16(),
                kind = %body.error,
                message = %body.message,
                "Request rejected"
            );
        }

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn render(error: CoreError) -> (StatusCode, Value) {
        let response = ApiError::from(error).into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, body) = render(CoreError::product_not_found(7)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "error": "NotFound", "message": "Product not found with id: 7" })
        );
    }

    #[tokio::test]
    async fn test_conflict_carries_code() {
        let (status, body) = render(CoreError::product_not_in_stock()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body,
            json!({ "error": "Conflict", "code": "1202", "message": "Product not in stock" })
        );
    }

    #[tokio::test]
    async fn test_bad_request_omits_empty_errors() {
        let (status, body) = render(CoreError::bad_request("Malformed JSON body")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "BadRequest", "message": "Malformed JSON body" })
        );
    }

    #[tokio::test]
    async fn test_validation_lists_fields() {
        let (status, body) = render(CoreError::Validation(vec![ValidationError::Required {
            field: "quantity".to_string(),
        }]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadRequest");
        assert_eq!(body["message"], "one or more fields are invalid");
        assert_eq!(
            body["errors"],
            json!([{ "key": "quantity", "message": "quantity is required" }])
        );
    }

    #[tokio::test]
    async fn test_internal_exposes_details() {
        let (status, body) =
            render(CoreError::internal("Something went wrong", json!({ "items": 6 }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "InternalServerError");
        assert_eq!(body["details"], json!({ "items": 6 }));
    }
}
