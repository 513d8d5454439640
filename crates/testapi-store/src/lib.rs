//! # testapi-store: In-Memory Storage for the Test API
//!
//! This crate keeps every record the API serves in process memory. There is
//! no database; data is seeded at startup and gone on restart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Test API Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /basket/{key}/products/{id})                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 testapi-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │     Seed     │  │   │
//! │  │   │  (store.rs)   │    │               │    │   (seed.rs)  │  │   │
//! │  │   │               │    │ BasketStore   │    │              │  │   │
//! │  │   │ StoreConfig   │───►│ ProductRepo   │◄───│ products     │  │   │
//! │  │   │ regenerate()  │    │ TaskRepo      │    │ users, tasks │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<Mutex<..>> tables in process memory                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` handle and its configuration
//! - [`repository`] - Basket store and record repositories
//! - [`seed`] - Deterministic fake data
//!
//! ## Usage
//!
//! ```rust
//! use testapi_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::default());
//!
//! // Baskets are created (and seeded) on first access
//! let basket = store.baskets().get_or_create("abc");
//! assert_eq!(basket.len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use store::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::{BasketStore, ProductRepository, TaskRepository, UserRepository};
