//! # Request Extractors
//!
//! Request inputs are decoded here, so that decode failures leave as the
//! same `ApiError` bodies as domain failures. [`RawBody`] defers decoding
//! until the handler asks for it.
//!
//! ```text
//! body bytes ──► serde_json::Value ──► RequestBody::from_json ──► T
//!                    │                        │
//!                    ▼                        ▼
//!          BadRequest "Malformed     Validation [{ key, message }]
//!                    JSON body"
//! ```

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::Uri;
use serde_json::Value;
use testapi_core::requests::RequestBody;
use testapi_core::{CoreError, ListQuery, ValidationError};

use crate::error::ApiError;

/// JSON body decoded field by field.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: RequestBody + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let RawBody(bytes) = RawBody::from_request(req, state).await?;
        Ok(JsonBody(decode_json(&bytes)?))
    }
}

/// Request body bytes, decoded later with [`RawBody::decode`].
///
/// Used where a handler must check something else (the product behind a
/// basket line) before the body is allowed to fail.
#[derive(Debug, Clone)]
pub struct RawBody(pub Bytes);

impl RawBody {
    pub fn decode<T: RequestBody>(&self) -> Result<T, ApiError> {
        decode_json(&self.0)
    }
}

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::bad_request(rejection.body_text()))?;
        Ok(RawBody(bytes))
    }
}

fn decode_json<T: RequestBody>(bytes: &[u8]) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|_| CoreError::bad_request("Malformed JSON body"))?;
    Ok(T::from_json(&value)?)
}

/// `page`, `pageSize` and `sortBy` from the query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams(pub ListQuery);

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = query_map(&parts.uri)?;
        Ok(ListParams(ListQuery::from_params(&params)?))
    }
}

/// Raw query parameters as strings.
pub fn query_map(uri: &Uri) -> Result<HashMap<String, String>, ApiError> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map_err(|rejection| CoreError::bad_request(rejection.body_text()))?;
    Ok(params)
}

/// Reads a boolean query flag; `true` and `1` switch it on.
pub fn query_flag(uri: &Uri, name: &str) -> Result<bool, ApiError> {
    let params = query_map(uri)?;
    Ok(params
        .get(name)
        .is_some_and(|value| value == "true" || value == "1"))
}

/// Parses a numeric path segment, naming the segment on failure.
pub fn parse_id(raw: &str, field: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| {
        ApiError::from(CoreError::invalid_field(ValidationError::InvalidType {
            field: field.to_string(),
            expected: "integer".to_string(),
        }))
    })
}
