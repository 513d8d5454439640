//! # Basket Store
//!
//! Baskets keyed by an opaque caller-supplied string.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  first access for "abc" ──► Basket::seeded()                           │
//! │                              [{1, product 1, x1}, {2, product 2, x4}]  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  mutations (with_basket_mut) ──► items change in place                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  clear("abc", refill) ──► previous items returned                      │
//! │                           basket stays addressable (empty or seeded)   │
//! │                                                                         │
//! │  Baskets are never deleted.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use testapi_core::Basket;
use tracing::debug;

use super::lock;

/// Process-wide basket map. Clones share the same baskets.
#[derive(Debug, Clone, Default)]
pub struct BasketStore {
    baskets: Arc<Mutex<HashMap<String, Basket>>>,
}

impl BasketStore {
    pub fn new() -> Self {
        BasketStore::default()
    }

    /// Returns the basket for `key`, creating a seeded one if absent.
    pub fn get_or_create(&self, key: &str) -> Basket {
        self.with_basket_mut(key, |basket| basket.clone())
    }

    /// Non-creating lookup.
    pub fn get(&self, key: &str) -> Option<Basket> {
        lock(&self.baskets).get(key).cloned()
    }

    /// Empties the basket (re-seeding it when `refill` is set) and returns
    /// its contents from just before.
    ///
    /// An unknown key is created first, so the seed items come back.
    pub fn clear(&self, key: &str, refill: bool) -> Basket {
        let previous = self.with_basket_mut(key, |basket| basket.clear(refill));
        debug!(key, refill, removed = previous.len(), "Basket cleared");
        previous
    }

    /// Runs `f` on the basket for `key` under the lock, creating it first if
    /// needed.
    ///
    /// ## Usage
    /// ```rust
    /// use testapi_store::BasketStore;
    ///
    /// let baskets = BasketStore::new();
    /// baskets.with_basket_mut("abc", |basket| basket.add_or_merge(2, 3));
    /// assert_eq!(baskets.get("abc").unwrap().find(2).unwrap().quantity, 7);
    /// ```
    pub fn with_basket_mut<F, R>(&self, key: &str, f: F) -> R
    where
        F: FnOnce(&mut Basket) -> R,
    {
        let mut baskets = lock(&self.baskets);
        let basket = baskets.entry(key.to_string()).or_insert_with(|| {
            debug!(key, "Creating seeded basket");
            Basket::seeded()
        });
        f(basket)
    }

    /// Number of known basket keys.
    pub fn len(&self) -> usize {
        lock(&self.baskets).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.baskets).is_empty()
    }
}
