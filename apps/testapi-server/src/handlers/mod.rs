//! HTTP handlers, one module per resource.
//!
//! Handlers stay thin: decode inputs through the extractors, call the store
//! or a service, and return JSON. Every failure leaves as an `ApiError`.

pub mod basket;
pub mod docs;
pub mod products;
pub mod system;
pub mod tasks;
pub mod users;
