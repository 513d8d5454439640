//! # Repository Module
//!
//! In-memory repositories for the test API.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Handler                                                               │
//! │       │                                                                 │
//! │       │  store.products().get(1000)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository / TaskRepository / UserRepository                   │
//! │       │                                                                 │
//! │       │  Table<T>: Arc<Mutex<Vec<T>>>, insertion ordered               │
//! │       ▼                                                                 │
//! │  Process memory (gone on restart)                                      │
//! │                                                                         │
//! │  BasketStore                                                           │
//! │       │                                                                 │
//! │       │  Arc<Mutex<HashMap<String, Basket>>>                           │
//! │       ▼                                                                 │
//! │  Process memory                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call takes the lock once, so each operation is atomic from the
//! caller's point of view. Sequences of calls are not: two requests that
//! read, modify and write the same record can interleave.
//!
//! ## Available Repositories
//!
//! - [`BasketStore`] - Baskets keyed by an opaque string
//! - [`ProductRepository`] - Product CRUD, also the basket's product catalog
//! - [`TaskRepository`] - Task CRUD
//! - [`UserRepository`] - User CRUD

pub mod basket;
pub mod product;
pub mod task;
pub mod user;

pub use basket::BasketStore;
pub use product::ProductRepository;
pub use task::TaskRepository;
pub use user::UserRepository;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use testapi_core::{Product, Task, User};

/// Locks a mutex, taking the data even if a previous holder panicked.
///
/// Every mutation under these locks is a single assignment, push or remove,
/// so poisoned data is still consistent.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Records
// =============================================================================

/// A row with a numeric primary key.
pub trait Record: Clone {
    fn id(&self) -> i64;
}

impl Record for Product {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Task {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}

// =============================================================================
// Table
// =============================================================================

/// Insertion-ordered rows behind a shared lock. Clones share the rows.
#[derive(Debug)]
pub struct Table<T> {
    rows: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Table {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T: Record> Table<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Table {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    /// Copy of every row, in insertion order.
    pub fn all(&self) -> Vec<T> {
        lock(&self.rows).clone()
    }

    pub fn count(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn get(&self, id: i64) -> Option<T> {
        lock(&self.rows).iter().find(|row| row.id() == id).cloned()
    }

    /// Inserts the row built from the next free id.
    ///
    /// The next id is one past the highest id, or `first_id` when empty.
    pub fn insert_with(&self, first_id: i64, build: impl FnOnce(i64) -> T) -> T {
        let mut rows = lock(&self.rows);
        let id = rows
            .iter()
            .map(Record::id)
            .max()
            .map_or(first_id, |max| max + 1);
        let row = build(id);
        rows.push(row.clone());
        row
    }

    /// Applies `change` to the row with `id` and returns the result.
    pub fn update(&self, id: i64, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = lock(&self.rows);
        let row = rows.iter_mut().find(|row| row.id() == id)?;
        change(row);
        Some(row.clone())
    }

    /// Removes and returns the row with `id`.
    pub fn delete(&self, id: i64) -> Option<T> {
        let mut rows = lock(&self.rows);
        let index = rows.iter().position(|row| row.id() == id)?;
        Some(rows.remove(index))
    }

    /// Swaps every row for `rows`.
    pub fn replace_all(&self, rows: Vec<T>) {
        *lock(&self.rows) = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, desc: &str) -> Task {
        Task {
            id,
            desc: desc.to_string(),
            completed: false,
        }
    }

    #[test]
    fn test_insert_uses_max_id() {
        let table = Table::new(vec![task(3, "a"), task(1, "b")]);
        let inserted = table.insert_with(1000, |id| task(id, "c"));
        assert_eq!(inserted.id, 4);

        let empty: Table<Task> = Table::new(Vec::new());
        assert_eq!(empty.insert_with(1000, |id| task(id, "d")).id, 1000);
    }

    #[test]
    fn test_update_and_delete() {
        let table = Table::new(vec![task(1, "a"), task(2, "b")]);

        let updated = table.update(2, |row| row.completed = true).unwrap();
        assert!(updated.completed);
        assert!(table.update(9, |row| row.completed = true).is_none());

        assert_eq!(table.delete(1).unwrap().desc, "a");
        assert!(table.delete(1).is_none());
        assert_eq!(table.count(), 1);
    }

    #[test]
    fn test_clones_share_rows() {
        let table = Table::new(vec![task(1, "a")]);
        let other = table.clone();
        other.replace_all(Vec::new());
        assert_eq!(table.count(), 0);
    }
}
