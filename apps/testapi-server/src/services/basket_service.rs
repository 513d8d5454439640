//! # Basket Service
//!
//! Enforces the basket rules on top of the [`BasketStore`], given a basket
//! key, a product id and a raw quantity.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /basket/{key}/products/{productId}  { quantity: 2.7 }            │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Reject an empty key                      → 404             │    │
//! │  │  2. catalog.require_stocked(productId)       → 404 / 409 1202  │    │
//! │  │  3. Coerce quantity (2.7 → 2, add path never below 1)         │    │
//! │  │  4. Mutate the basket under the store lock                    │    │
//! │  │  5. Return the whole basket                                    │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::json;
use testapi_core::basket::{coerce_absolute_quantity, coerce_added_quantity};
use testapi_core::{Basket, CoreError, CoreResult, ProductCatalog};
use testapi_store::BasketStore;
use tracing::debug;

/// Basket rules over a store and a product catalog.
#[derive(Debug, Clone)]
pub struct BasketService<C> {
    baskets: BasketStore,
    catalog: C,
}

impl<C: ProductCatalog> BasketService<C> {
    pub fn new(baskets: BasketStore, catalog: C) -> Self {
        BasketService { baskets, catalog }
    }

    /// Returns the basket, creating a seeded one for a new key.
    ///
    /// Baskets holding more than five items fail with a deliberate 500 so
    /// clients can exercise their error paths.
    pub fn get_basket(&self, key: &str) -> CoreResult<Basket> {
        require_key(key)?;
        let basket = self.baskets.get_or_create(key);

        if basket.exceeds_fault_threshold() {
            debug!(key, items = basket.len(), "Basket over fault threshold");
            return Err(CoreError::internal("Something went wrong", json!({})));
        }
        Ok(basket)
    }

    /// Checks that the product exists and is stocked.
    ///
    /// Handlers call this before decoding the quantity body, so a bad
    /// product answers 404/409 even when the body is also invalid.
    pub fn check_product(&self, product_id: i64) -> CoreResult<()> {
        self.catalog.require_stocked(product_id)?;
        Ok(())
    }

    /// Adds a product, merging into an existing line.
    pub fn add_or_merge_item(&self, key: &str, product_id: i64, quantity: f64) -> CoreResult<Basket> {
        require_key(key)?;
        self.catalog.require_stocked(product_id)?;
        let quantity = coerce_added_quantity(quantity);

        let (outcome, basket) = self.baskets.with_basket_mut(key, |basket| {
            let outcome = basket.add_or_merge(product_id, quantity);
            (outcome, basket.clone())
        });
        debug!(key, product_id, quantity, ?outcome, "Basket item added");
        Ok(basket)
    }

    /// Sets the absolute quantity of a product; 0 removes the line.
    pub fn set_quantity(&self, key: &str, product_id: i64, quantity: f64) -> CoreResult<Basket> {
        require_key(key)?;
        self.catalog.require_stocked(product_id)?;
        let quantity = coerce_absolute_quantity(quantity)?;

        let outcome = self
            .baskets
            .with_basket_mut(key, |basket| basket.set_quantity(product_id, quantity))?;
        debug!(key, product_id, quantity, ?outcome, "Basket quantity set");

        Ok(self.baskets.get_or_create(key))
    }

    /// Removes the line for a product currently in the basket.
    pub fn remove_item(&self, key: &str, product_id: i64) -> CoreResult<Basket> {
        require_key(key)?;
        let basket = self.baskets.with_basket_mut(key, |basket| {
            basket.remove(product_id)?;
            Ok::<_, CoreError>(basket.clone())
        })?;
        debug!(key, product_id, "Basket item removed");
        Ok(basket)
    }

    /// Empties the basket and returns what it held.
    pub fn clear_basket(&self, key: &str, refill: bool) -> CoreResult<Basket> {
        require_key(key)?;
        Ok(self.baskets.clear(key, refill))
    }
}

fn require_key(key: &str) -> CoreResult<()> {
    if key.is_empty() {
        return Err(CoreError::not_found("Basket without key not available"));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
