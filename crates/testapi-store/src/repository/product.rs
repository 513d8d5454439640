//! # Product Repository
//!
//! Product CRUD over an in-memory table.
//!
//! ## Query Patterns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Lookups                                      │
//! │                                                                         │
//! │  1. List (GET /products)                                               │
//! │     └── all() then ListQuery::paginate in the handler                  │
//! │                                                                         │
//! │  2. By id (GET /products/{id}, basket operations)                      │
//! │     └── get(id) / ProductCatalog::find_product(id)                     │
//! │                                                                         │
//! │  3. Writes                                                             │
//! │     ├── create: id = max + 1 (1000 when empty)                         │
//! │     ├── update: present fields overwrite, updatedAt = now              │
//! │     └── delete: returns the removed product                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use testapi_core::requests::{ProductCreate, ProductUpdate};
use testapi_core::{Product, ProductCatalog, FIRST_SEED_ID};
use tracing::debug;

use super::Table;

/// Repository for product operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    table: Table<Product>,
}

impl ProductRepository {
    /// Creates a repository holding `products`.
    pub fn new(products: Vec<Product>) -> Self {
        ProductRepository {
            table: Table::new(products),
        }
    }

    /// Every product, in insertion order.
    pub fn all(&self) -> Vec<Product> {
        self.table.all()
    }

    pub fn count(&self) -> usize {
        self.table.count()
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.table.get(id)
    }

    /// Stores a new product and returns it with its id and timestamps.
    pub fn create(&self, input: ProductCreate) -> Product {
        let now = Utc::now();
        let product = self
            .table
            .insert_with(FIRST_SEED_ID, |id| input.into_product(id, now));
        debug!(id = product.id, sku = %product.sku, "Product created");
        product
    }

    /// Applies `changes` to the product with `id`.
    pub fn update(&self, id: i64, changes: ProductUpdate) -> Option<Product> {
        let now = Utc::now();
        self.table
            .update(id, |product| changes.apply_to(product, now))
    }

    /// Removes the product with `id`.
    pub fn delete(&self, id: i64) -> Option<Product> {
        self.table.delete(id)
    }

    /// Swaps the whole catalog.
    pub fn reset(&self, products: Vec<Product>) {
        debug!(count = products.len(), "Product table reset");
        self.table.replace_all(products);
    }
}

impl ProductCatalog for ProductRepository {
    fn find_product(&self, id: i64) -> Option<Product> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use testapi_core::CoreError;

    fn input(sku: &str) -> ProductCreate {
        ProductCreate {
            sku: sku.to_string(),
            title: "Test Product".to_string(),
            stocked: true,
            price: 9.99,
            desc: None,
            image: None,
            base_price: None,
        }
    }

    #[test]
    fn test_create_assigns_next_id() {
        let repo = ProductRepository::new(seed::products(3, Utc::now()));
        let created = repo.create(input("NEW-1"));
        assert_eq!(created.id, 1003);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(repo.get(1003), Some(created));
    }

    #[test]
    fn test_create_in_empty_catalog_starts_at_1000() {
        let repo = ProductRepository::new(Vec::new());
        assert_eq!(repo.create(input("NEW-1")).id, 1000);
    }

    #[test]
    fn test_update_touches_updated_at() {
        let repo = ProductRepository::new(seed::products(1, Utc::now()));
        let before = repo.get(1000).unwrap();

        let changes = ProductUpdate {
            title: Some("Renamed".to_string()),
            ..ProductUpdate::default()
        };
        let after = repo.update(1000, changes).unwrap();
        assert_eq!(after.title, "Renamed");
        assert_eq!(after.sku, before.sku);
        assert!(after.updated_at >= before.updated_at);

        assert!(repo.update(42, ProductUpdate::default()).is_none());
    }

    #[test]
    fn test_delete() {
        let repo = ProductRepository::new(seed::products(2, Utc::now()));
        assert_eq!(repo.delete(1001).unwrap().id, 1001);
        assert!(repo.delete(1001).is_none());
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn test_catalog_checks_stock() {
        let repo = ProductRepository::new(seed::products(5, Utc::now()));
        assert!(repo.require_stocked(1000).is_ok());
        assert!(matches!(
            repo.require_stocked(1004),
            Err(CoreError::Conflict { .. })
        ));
        assert!(matches!(
            repo.require_stocked(1),
            Err(CoreError::NotFound { .. })
        ));
    }
}
