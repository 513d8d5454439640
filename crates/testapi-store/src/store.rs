//! # Store Handle
//!
//! One handle owning every repository the server uses.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Lifecycle                                 │
//! │                                                                         │
//! │  Server startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::default() ← seed counts from ServerConfig                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::new(config) ← seeds products, users, tasks                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppState { store } ── shared by every request ──┐                     │
//! │       │                                          │                      │
//! │       │  DELETE /system                          │                      │
//! │       ▼                                          │                      │
//! │  store.regenerate() ← products/users/tasks back  │                      │
//! │                       to seed, baskets kept      │                      │
//! │                                                  ▼                      │
//! │  Server shutdown ── Store dropped, data gone                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tests build a fresh `Store` each, so no state leaks between them.

use chrono::Utc;
use tracing::info;

use crate::repository::{BasketStore, ProductRepository, TaskRepository, UserRepository};
use crate::seed;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use testapi_store::{Store, StoreConfig};
///
/// let store = Store::new(StoreConfig::default().product_seed_count(10));
/// assert_eq!(store.products().count(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Products generated at startup and on reset.
    /// Default: 100
    pub product_seed_count: usize,

    /// Users generated at startup and on reset.
    /// Default: 100
    pub user_seed_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            product_seed_count: 100,
            user_seed_count: 100,
        }
    }
}

impl StoreConfig {
    /// Sets the number of seeded products.
    pub fn product_seed_count(mut self, count: usize) -> Self {
        self.product_seed_count = count;
        self
    }

    /// Sets the number of seeded users.
    pub fn user_seed_count(mut self, count: usize) -> Self {
        self.user_seed_count = count;
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing repository access.
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
    baskets: BasketStore,
    products: ProductRepository,
    tasks: TaskRepository,
    users: UserRepository,
}

impl Store {
    /// Creates a store filled with seed data.
    pub fn new(config: StoreConfig) -> Self {
        let now = Utc::now();
        let store = Store {
            baskets: BasketStore::new(),
            products: ProductRepository::new(seed::products(config.product_seed_count, now)),
            tasks: TaskRepository::new(seed::tasks()),
            users: UserRepository::new(seed::users(config.user_seed_count, now)),
            config,
        };

        info!(
            products = store.config.product_seed_count,
            users = store.config.user_seed_count,
            "In-memory store seeded"
        );
        store
    }

    /// Returns the basket store.
    pub fn baskets(&self) -> &BasketStore {
        &self.baskets
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust
    /// use testapi_store::{Store, StoreConfig};
    ///
    /// let store = Store::new(StoreConfig::default());
    /// assert!(store.products().get(1000).is_some());
    /// ```
    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    /// Returns the task repository.
    pub fn tasks(&self) -> &TaskRepository {
        &self.tasks
    }

    /// Returns the user repository.
    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Puts products, users and tasks back to freshly seeded data.
    ///
    /// Baskets are left alone.
    pub fn regenerate(&self) {
        let now = Utc::now();
        self.products
            .reset(seed::products(self.config.product_seed_count, now));
        self.users
            .reset(seed::users(self.config.user_seed_count, now));
        self.tasks.reset(seed::tasks());
        info!("Products, users and tasks regenerated");
    }
}
