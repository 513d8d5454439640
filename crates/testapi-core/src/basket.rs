//! # Basket Aggregate
//!
//! The mutation rules of a single basket. The store decides where baskets
//! live; this module decides what happens to their items.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Basket Mutations                                    │
//! │                                                                         │
//! │  add_or_merge(productId, qty)                                          │
//! │  ├── productId absent  → push { id: max(id)+1, productId, qty }        │
//! │  └── productId present → item.quantity += qty                          │
//! │                                                                         │
//! │  set_quantity(productId, qty)                                          │
//! │  ├── qty < 0                   → BadRequest, basket untouched          │
//! │  ├── present, qty > 0          → item.quantity = qty                   │
//! │  ├── present, qty == 0         → item removed                          │
//! │  ├── absent,  qty > 0          → push new item                         │
//! │  └── absent,  qty == 0         → no-op                                 │
//! │                                                                         │
//! │  remove(productId)                                                     │
//! │  ├── present → item removed                                            │
//! │  └── absent  → NotFound, basket untouched                              │
//! │                                                                         │
//! │  clear(refill) → previous items; empty or the two seed items remain    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! Within one basket `productId` is unique. Every lookup goes through the
//! product id and resolves to the item's real position in the vector, so ids
//! and positions are free to diverge after removals.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::BasketItem;
use crate::BASKET_FAULT_THRESHOLD;

// =============================================================================
// Quantity Coercion
// =============================================================================

/// Coerces the quantity sent to the add endpoint.
///
/// Fractions truncate toward zero. Anything that ends up zero or below, or
/// was never a finite number, becomes 1: adding always adds at least one.
pub fn coerce_added_quantity(raw: f64) -> i64 {
    if !raw.is_finite() {
        return 1;
    }
    let quantity = raw.trunc() as i64;
    if quantity <= 0 {
        1
    } else {
        quantity
    }
}

/// Coerces the quantity sent to the set endpoint.
///
/// Fractions truncate toward zero and non-finite values count as 0, which
/// means "remove". Negative results are rejected.
pub fn coerce_absolute_quantity(raw: f64) -> CoreResult<i64> {
    if !raw.is_finite() {
        return Ok(0);
    }
    let quantity = raw.trunc() as i64;
    if quantity < 0 {
        return Err(negative_quantity());
    }
    Ok(quantity)
}

fn negative_quantity() -> CoreError {
    let error = ValidationError::MustNotBeNegative {
        field: "quantity".to_string(),
    };
    CoreError::BadRequest {
        message: error.to_string(),
        errors: vec![error.to_field_error()],
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// What `add_or_merge` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Merged,
}

/// What `set_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Inserted,
    Updated,
    Removed,
    Unchanged,
}

// =============================================================================
// Basket
// =============================================================================

/// An ordered list of basket items, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Basket {
    items: Vec<BasketItem>,
}

impl Basket {
    /// The two items every new basket starts with.
    pub fn seeded() -> Self {
        Basket {
            items: vec![BasketItem::new(1, 1, 1), BasketItem::new(2, 2, 4)],
        }
    }

    /// A basket without items.
    pub fn empty() -> Self {
        Basket::default()
    }

    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item holding `product_id`, if any.
    pub fn find(&self, product_id: i64) -> Option<&BasketItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    fn position(&self, product_id: i64) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id)
    }

    /// Id for the next inserted item: one past the highest id, or 1.
    pub fn next_item_id(&self) -> i64 {
        self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1
    }

    /// True when a read of this basket must fail on purpose.
    pub fn exceeds_fault_threshold(&self) -> bool {
        self.items.len() > BASKET_FAULT_THRESHOLD
    }

    /// Adds `quantity` of a product, merging into an existing line.
    ///
    /// `quantity` is expected to be coerced already (see
    /// [`coerce_added_quantity`]).
    pub fn add_or_merge(&mut self, product_id: i64, quantity: i64) -> AddOutcome {
        match self.position(product_id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(quantity);
                AddOutcome::Merged
            }
            None => {
                let id = self.next_item_id();
                self.items.push(BasketItem::new(id, product_id, quantity));
                AddOutcome::Inserted
            }
        }
    }

    /// Sets the absolute quantity of a product; 0 removes the line.
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> CoreResult<SetOutcome> {
        if quantity < 0 {
            return Err(negative_quantity());
        }

        let outcome = match (self.position(product_id), quantity) {
            (Some(index), 0) => {
                self.items.remove(index);
                SetOutcome::Removed
            }
            (Some(index), quantity) => {
                self.items[index].quantity = quantity;
                SetOutcome::Updated
            }
            (None, 0) => SetOutcome::Unchanged,
            (None, quantity) => {
                let id = self.next_item_id();
                self.items.push(BasketItem::new(id, product_id, quantity));
                SetOutcome::Inserted
            }
        };
        Ok(outcome)
    }

    /// Removes the line for `product_id`.
    pub fn remove(&mut self, product_id: i64) -> CoreResult<BasketItem> {
        let index = self
            .position(product_id)
            .ok_or_else(|| CoreError::product_not_found(product_id))?;
        Ok(self.items.remove(index))
    }

    /// Empties the basket, optionally re-seeding it, and hands back what it
    /// held before.
    pub fn clear(&mut self, refill: bool) -> Basket {
        let next = if refill {
            Basket::seeded()
        } else {
            Basket::empty()
        };
        std::mem::replace(self, next)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
