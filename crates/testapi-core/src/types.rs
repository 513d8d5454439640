//! # Domain Types
//!
//! Wire types shared by the store and the HTTP layer.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   BasketItem    │   │    Product      │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (1-based)   │   │  id (1000+)     │   │  id (1000+)     │       │
//! │  │  productId ─────┼──►│  sku, title     │   │  name, age      │       │
//! │  │  quantity       │   │  stocked        │   │  email          │       │
//! │  └─────────────────┘   │  price          │   │  address        │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Task       │   │     Page<T>     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id, desc       │   │  page, pageSize │                             │
//! │  │  completed      │   │  total, items   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types serialize with camelCase keys, which is what clients see.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Basket Item
// =============================================================================

/// One line of a basket.
///
/// `id` is unique within its basket only. `product_id` references a
/// [`Product`] that the basket never owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasketItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

impl BasketItem {
    pub fn new(id: i64, product_id: i64, quantity: i64) -> Self {
        BasketItem {
            id,
            product_id,
            quantity,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: i64,

    /// Stock Keeping Unit.
    pub sku: String,

    pub title: String,

    /// Basket additions are refused while this is false.
    pub stocked: bool,

    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Price before the 20% discount applied to seeded products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Task
// =============================================================================

/// A to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[ts(export)]
pub struct Task {
    pub id: i64,

    /// Description of the task.
    pub desc: String,

    /// Is the task completed?
    pub completed: bool,
}

// =============================================================================
// User
// =============================================================================

/// Postal address embedded in a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[ts(export)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
}

/// A user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,

    /// Between 18 and 80 inclusive.
    pub age: i64,

    pub email: String,
    pub image: String,
    pub phone: String,
    pub company: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    pub address: Address,
}

// =============================================================================
// Paged Lists
// =============================================================================

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Page<T> {
    pub page: usize,
    pub page_size: usize,

    /// Number of records before paging.
    pub total: usize,

    pub items: Vec<T>,
}

/// Body returned by the system reset endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[ts(export)]
pub struct Message {
    pub message: String,
}
