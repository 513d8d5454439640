//! Product lookup seam used by basket operations.
//!
//! Basket rules only need to know whether a product exists and whether it is
//! stocked. Anything that can answer that implements [`ProductCatalog`]; the
//! store's product repository is the real one, tests use fixed lists.

use crate::error::{CoreError, CoreResult};
use crate::types::Product;

/// Read-only product lookup.
pub trait ProductCatalog {
    /// Returns a copy of the product with `id`, if it exists.
    fn find_product(&self, id: i64) -> Option<Product>;

    /// Looks the product up and checks that it may go into a basket.
    ///
    /// Missing products are `NotFound`, unstocked ones the "1202" conflict.
    fn require_stocked(&self, id: i64) -> CoreResult<Product> {
        let product = self
            .find_product(id)
            .ok_or_else(|| CoreError::product_not_found(id))?;
        if !product.stocked {
            return Err(CoreError::product_not_in_stock());
        }
        Ok(product)
    }
}

impl ProductCatalog for [Product] {
    fn find_product(&self, id: i64) -> Option<Product> {
        self.iter().find(|product| product.id == id).cloned()
    }
}

impl ProductCatalog for Vec<Product> {
    fn find_product(&self, id: i64) -> Option<Product> {
        self.as_slice().find_product(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i64, stocked: bool) -> Product {
        let now = Utc::now();
        Product {
            id,
            sku: format!("SKU-{}", id),
            title: format!("Product {}", id),
            stocked,
            price: 1.0,
            desc: None,
            image: None,
            base_price: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_require_stocked() {
        let catalog = vec![product(1, true), product(2, false)];

        assert_eq!(catalog.require_stocked(1).unwrap().id, 1);
        assert!(matches!(
            catalog.require_stocked(2),
            Err(CoreError::Conflict { .. })
        ));
        assert!(matches!(
            catalog.require_stocked(3),
            Err(CoreError::NotFound { .. })
        ));
    }
}
