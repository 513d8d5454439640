//! # Error Types
//!
//! Domain error taxonomy for the test API.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  testapi-core errors (this file)                                       │
//! │  ├── CoreError        - The closed set of outcome kinds                │
//! │  │   ├── NotFound     → 404                                            │
//! │  │   ├── Conflict     → 409 (carries a business code, e.g. "1202")     │
//! │  │   ├── BadRequest   → 400                                            │
//! │  │   ├── Validation   → 400 (per-field error list)                     │
//! │  │   └── Internal     → 500 (diagnostic details)                       │
//! │  └── ValidationError  - One failed field rule                          │
//! │                                                                         │
//! │  testapi-server                                                        │
//! │  └── ApiError         - CoreError rendered as an HTTP response         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON body              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Business-rule violations always get their own kind, never `Internal`
//! 3. Callers pick the HTTP status from the variant, never from message text

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Business code attached to the out-of-stock conflict.
pub const PRODUCT_NOT_IN_STOCK_CODE: &str = "1202";

// =============================================================================
// Core Error
// =============================================================================

/// Every request ends in success or exactly one of these kinds.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced basket, product, item or record does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// A business rule rejected the operation.
    ///
    /// ## When This Occurs
    /// - Adding or setting a product whose `stocked` flag is false
    ///
    /// ```text
    /// POST /basket/abc/products/1007 { quantity: 1 }
    ///      │
    ///      ▼
    /// product 1007: stocked = false
    ///      │
    ///      ▼
    /// Conflict { code: "1202", message: "Product not in stock" }
    /// ```
    #[error("{message}")]
    Conflict { code: String, message: String },

    /// The input parsed but cannot be acted on.
    #[error("{message}")]
    BadRequest {
        message: String,
        errors: Vec<FieldError>,
    },

    /// The input failed field validation.
    #[error("one or more fields are invalid")]
    Validation(Vec<ValidationError>),

    /// Anything else. Details are exposed to the client on purpose; this is
    /// a test API, not a production posture.
    #[error("{message}")]
    Internal {
        message: String,
        details: serde_json::Value,
    },
}

impl CoreError {
    /// Creates a NotFound error with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound {
            message: message.into(),
        }
    }

    /// NotFound for a product id that the catalog does not know.
    pub fn product_not_found(product_id: i64) -> Self {
        CoreError::not_found(format!("Product not found with id: {}", product_id))
    }

    /// The out-of-stock conflict raised by the basket add and set paths.
    pub fn product_not_in_stock() -> Self {
        CoreError::Conflict {
            code: PRODUCT_NOT_IN_STOCK_CODE.to_string(),
            message: "Product not in stock".to_string(),
        }
    }

    /// Creates a BadRequest error without field details.
    pub fn bad_request(message: impl Into<String>) -> Self {
        CoreError::BadRequest {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Creates an Internal error with structured details.
    pub fn internal(message: impl Into<String>, details: serde_json::Value) -> Self {
        CoreError::Internal {
            message: message.into(),
            details,
        }
    }

    /// Wraps a single field failure.
    pub fn invalid_field(error: ValidationError) -> Self {
        CoreError::Validation(vec![error])
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::invalid_field(err)
    }
}

impl From<Vec<ValidationError>> for CoreError {
    fn from(errors: Vec<ValidationError>) -> Self {
        CoreError::Validation(errors)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field rule failure.
///
/// `field` is the wire name of the offending key (camelCase, dotted for
/// nested objects such as `address.zip`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Field has the wrong JSON type.
    #[error("{field} must be of type {expected}")]
    InvalidType { field: String, expected: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Key is not accepted by a strict body.
    #[error("{field} is not a recognized field")]
    UnknownField { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

impl ValidationError {
    /// Returns the wire key the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidType { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::UnknownField { field }
            | ValidationError::MustNotBeNegative { field } => field,
        }
    }

    /// Renders the `{ key, message }` pair sent to clients.
    pub fn to_field_error(&self) -> FieldError {
        FieldError {
            key: self.field().to_string(),
            message: self.to_string(),
        }
    }
}

/// Per-field error entry of a 400 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[ts(export)]
pub struct FieldError {
    pub key: String,
    pub message: String,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_conflict_carries_code() {
        match CoreError::product_not_in_stock() {
            CoreError::Conflict { code, message } => {
                assert_eq!(code, "1202");
                assert_eq!(message, "Product not in stock");
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity is required");

        let err = ValidationError::OutOfRange {
            field: "age".to_string(),
            min: 18,
            max: 80,
        };
        assert_eq!(err.to_string(), "age must be between 18 and 80");
    }

    #[test]
    fn test_field_error_uses_wire_key() {
        let err = ValidationError::InvalidFormat {
            field: "address.zip".to_string(),
            reason: "must not be empty".to_string(),
        };
        let field_error = err.to_field_error();
        assert_eq!(field_error.key, "address.zip");
        assert_eq!(
            field_error.message,
            "address.zip has invalid format: must not be empty"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::UnknownField {
            field: "foo".to_string(),
        }
        .into();
        match core_err {
            CoreError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected Validation, got {:?}", other),
        }
        assert_eq!(
            CoreError::Validation(Vec::new()).to_string(),
            "one or more fields are invalid"
        );
    }
}
