//! # testapi-core: Pure Domain Logic for the Test API
//!
//! This crate holds the rules of the test API as pure functions with zero
//! I/O dependencies. Storage lives in `testapi-store`, HTTP in
//! `testapi-server`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Test API Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 testapi-server (axum)                           │   │
//! │  │   Router ──► Extractors ──► Handlers ──► ApiError mapping       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ testapi-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  basket   │  │  listing  │  │ validation│  │   │
//! │  │   │  Product  │  │  merge    │  │  paging   │  │  field    │  │   │
//! │  │   │  User     │  │  set/rm   │  │  sorting  │  │  reader   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 testapi-store (in-memory)                       │   │
//! │  │        BasketStore, seeded Product/Task/User repositories       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (BasketItem, Product, Task, User, Page)
//! - [`basket`] - The basket aggregate and its mutation rules
//! - [`catalog`] - Product lookup seam used by basket operations
//! - [`requests`] - Request bodies decoded from JSON
//! - [`listing`] - Paging and sorting for list endpoints
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Field rules and the JSON field reader
//!
//! ## Example Usage
//!
//! ```rust
//! use testapi_core::basket::{Basket, coerce_added_quantity};
//!
//! let mut basket = Basket::seeded();
//! let quantity = coerce_added_quantity(3.9);
//! basket.add_or_merge(2, quantity);
//!
//! // Product 2 was seeded with 4, merging 3 more gives 7
//! assert_eq!(basket.find(2).map(|item| item.quantity), Some(7));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod catalog;
pub mod error;
pub mod listing;
pub mod requests;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::Basket;
pub use catalog::ProductCatalog;
pub use error::{CoreError, CoreResult, FieldError, ValidationError};
pub use listing::ListQuery;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// A basket holding more items than this fails `GET` with a 500.
///
/// Client test suites rely on this to exercise their error handling, so it
/// stays even though it looks like a bug.
pub const BASKET_FAULT_THRESHOLD: usize = 5;

/// Page size used when the query omits `pageSize` or sends 0.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// First id handed out to seeded products and users.
pub const FIRST_SEED_ID: i64 = 1000;

/// Inclusive age bounds for users.
pub const MIN_USER_AGE: i64 = 18;
pub const MAX_USER_AGE: i64 = 80;
