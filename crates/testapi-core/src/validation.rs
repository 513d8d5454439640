//! # Validation Module
//!
//! Field rules and the JSON field reader used to decode request bodies.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Syntax (server extractor)                                    │
//! │  └── Body is not JSON at all → BadRequest "Malformed JSON body"        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Shape (FieldReader, THIS MODULE)                             │
//! │  ├── Missing required keys      → Required                             │
//! │  ├── Wrong JSON types           → InvalidType                          │
//! │  └── Unknown keys (strict body) → UnknownField                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Field rules (THIS MODULE)                                    │
//! │  ├── validate_age   → OutOfRange                                       │
//! │  └── validate_email → InvalidFormat                                    │
//! │                                                                         │
//! │  Every failure is collected, so one 400 lists all bad fields.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use testapi_core::validation::FieldReader;
//!
//! let body = serde_json::json!({ "quantity": "three" });
//! let mut reader = FieldReader::new(&body).unwrap();
//! let _ = reader.number("quantity");
//!
//! let errors = reader.finish().unwrap_err();
//! assert_eq!(errors[0].field(), "quantity");
//! ```

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::{MAX_USER_AGE, MIN_USER_AGE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Rules
// =============================================================================

/// Validates a user's age.
///
/// ## Rules
/// - Must be between 18 and 80 inclusive
pub fn validate_age(field: &str, age: i64) -> ValidationResult<()> {
    if !(MIN_USER_AGE..=MAX_USER_AGE).contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: MIN_USER_AGE,
            max: MAX_USER_AGE,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace anywhere
///
/// ## Example
/// ```rust
/// use testapi_core::validation::validate_email;
///
/// assert!(validate_email("email", "ada.lovelace@example.com").is_ok());
/// assert!(validate_email("email", "ada@localhost").is_err());
/// ```
pub fn validate_email(field: &str, email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid email".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < domain.len() && !domain.starts_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

// =============================================================================
// Field Reader
// =============================================================================

/// Reads typed fields out of a JSON object and collects every failure.
///
/// Getters return `None` when the field is absent or unusable; the reason is
/// recorded and surfaced by [`FieldReader::finish`]. Nested objects get their
/// own reader whose keys are prefixed (`address.zip`).
#[derive(Debug)]
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    prefix: Option<String>,
    errors: Vec<ValidationError>,
}

impl<'a> FieldReader<'a> {
    /// Starts reading a request body. The body itself must be an object.
    pub fn new(body: &'a Value) -> Result<Self, Vec<ValidationError>> {
        match body.as_object() {
            Some(object) => Ok(FieldReader {
                object,
                prefix: None,
                errors: Vec::new(),
            }),
            None => Err(vec![ValidationError::InvalidType {
                field: "body".to_string(),
                expected: "object".to_string(),
            }]),
        }
    }

    fn key(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name.to_string(),
        }
    }

    fn lookup(&mut self, name: &str, required: bool) -> Option<&'a Value> {
        let object = self.object;
        match object.get(name) {
            Some(value) => Some(value),
            None => {
                if required {
                    let field = self.key(name);
                    self.errors.push(ValidationError::Required { field });
                }
                None
            }
        }
    }

    fn typed<T>(
        &mut self,
        name: &str,
        required: bool,
        expected: &str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Option<T> {
        let value = self.lookup(name, required)?;
        let converted = convert(value);
        if converted.is_none() {
            let field = self.key(name);
            self.errors.push(ValidationError::InvalidType {
                field,
                expected: expected.to_string(),
            });
        }
        converted
    }

    /// Required JSON number.
    pub fn number(&mut self, name: &str) -> Option<f64> {
        self.typed(name, true, "number", Value::as_f64)
    }

    pub fn optional_number(&mut self, name: &str) -> Option<f64> {
        self.typed(name, false, "number", Value::as_f64)
    }

    /// Required JSON number without a fractional part.
    pub fn integer(&mut self, name: &str) -> Option<i64> {
        self.typed(name, true, "integer", as_integer)
    }

    pub fn optional_integer(&mut self, name: &str) -> Option<i64> {
        self.typed(name, false, "integer", as_integer)
    }

    /// Required JSON string.
    pub fn string(&mut self, name: &str) -> Option<String> {
        self.typed(name, true, "string", |value| value.as_str().map(str::to_string))
    }

    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        self.typed(name, false, "string", |value| value.as_str().map(str::to_string))
    }

    /// Required JSON boolean.
    pub fn boolean(&mut self, name: &str) -> Option<bool> {
        self.typed(name, true, "boolean", Value::as_bool)
    }

    pub fn optional_boolean(&mut self, name: &str) -> Option<bool> {
        self.typed(name, false, "boolean", Value::as_bool)
    }

    /// Reader for a nested object. Merge it back with [`FieldReader::absorb`].
    pub fn object(&mut self, name: &str, required: bool) -> Option<FieldReader<'a>> {
        let object = self.typed(name, required, "object", Value::as_object)?;
        Some(FieldReader {
            object,
            prefix: Some(self.key(name)),
            errors: Vec::new(),
        })
    }

    /// Takes over the errors collected by a nested reader.
    pub fn absorb(&mut self, nested: FieldReader<'a>) {
        self.errors.extend(nested.errors);
    }

    /// Records the outcome of a field rule.
    pub fn check(&mut self, result: ValidationResult<()>) {
        if let Err(err) = result {
            self.errors.push(err);
        }
    }

    /// Rejects every key not in `allowed`. Used by strict bodies.
    pub fn deny_unknown(&mut self, allowed: &[&str]) {
        let object = self.object;
        let mut unknown: Vec<&String> = object
            .keys()
            .filter(|key| !allowed.contains(&key.as_str()))
            .collect();
        unknown.sort();
        for name in unknown {
            let field = self.key(name);
            self.errors.push(ValidationError::UnknownField { field });
        }
    }

    /// Ends reading. Returns every collected failure, if there were any.
    pub fn finish(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    if let Some(integer) = value.as_i64() {
        return Some(integer);
    }
    value
        .as_f64()
        .filter(|number| number.fract() == 0.0 && number.is_finite())
        .map(|number| number as i64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_age() {
        assert!(validate_age("age", 18).is_ok());
        assert!(validate_age("age", 80).is_ok());
        assert!(validate_age("age", 17).is_err());
        assert!(validate_age("age", 81).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "a.b@example.com").is_ok());
        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "no-at-sign.com").is_err());
        assert!(validate_email("email", "@example.com").is_err());
        assert!(validate_email("email", "a@b@example.com").is_err());
        assert!(validate_email("email", "a@example.").is_err());
        assert!(validate_email("email", "a @example.com").is_err());
    }

    #[test]
    fn test_body_must_be_object() {
        let body = json!([1, 2]);
        let errors = FieldReader::new(&body).unwrap_err();
        assert_eq!(errors[0].field(), "body");
    }

    #[test]
    fn test_collects_all_errors() {
        let body = json!({ "desc": 5, "extra": true });
        let mut reader = FieldReader::new(&body).unwrap();
        assert_eq!(reader.string("desc"), None);
        assert_eq!(reader.boolean("completed"), None);
        reader.deny_unknown(&["desc", "completed"]);

        let errors = reader.finish().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(fields, vec!["desc", "completed", "extra"]);
        assert!(matches!(errors[1], ValidationError::Required { .. }));
        assert!(matches!(errors[2], ValidationError::UnknownField { .. }));
    }

    #[test]
    fn test_optional_fields() {
        let body = json!({ "price": 2.5 });
        let mut reader = FieldReader::new(&body).unwrap();
        assert_eq!(reader.optional_number("price"), Some(2.5));
        assert_eq!(reader.optional_string("desc"), None);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_integer_accepts_whole_floats_only() {
        let body = json!({ "a": 30, "b": 30.0, "c": 30.5 });
        let mut reader = FieldReader::new(&body).unwrap();
        assert_eq!(reader.integer("a"), Some(30));
        assert_eq!(reader.integer("b"), Some(30));
        assert_eq!(reader.integer("c"), None);
        assert_eq!(reader.finish().unwrap_err().len(), 1);
    }

    #[test]
    fn test_nested_keys_are_prefixed() {
        let body = json!({ "address": { "street": "Main", "zip": 1 } });
        let mut reader = FieldReader::new(&body).unwrap();
        let mut address = reader.object("address", true).unwrap();
        let _ = address.string("street");
        let _ = address.string("city");
        let _ = address.string("zip");
        reader.absorb(address);

        let errors = reader.finish().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(fields, vec!["address.city", "address.zip"]);
    }
}
