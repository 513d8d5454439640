//! User CRUD over an in-memory table.

use chrono::Utc;
use testapi_core::requests::{UserCreate, UserUpdate};
use testapi_core::{User, FIRST_SEED_ID};
use tracing::debug;

use super::Table;

/// Repository for user operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    table: Table<User>,
}

impl UserRepository {
    pub fn new(users: Vec<User>) -> Self {
        UserRepository {
            table: Table::new(users),
        }
    }

    pub fn all(&self) -> Vec<User> {
        self.table.all()
    }

    pub fn count(&self) -> usize {
        self.table.count()
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.table.get(id)
    }

    /// Stores a new user; `createdAt` is now.
    pub fn create(&self, input: UserCreate) -> User {
        let now = Utc::now();
        let user = self
            .table
            .insert_with(FIRST_SEED_ID, |id| input.into_user(id, now));
        debug!(id = user.id, "User created");
        user
    }

    pub fn update(&self, id: i64, changes: UserUpdate) -> Option<User> {
        self.table.update(id, |user| changes.apply_to(user))
    }

    pub fn delete(&self, id: i64) -> Option<User> {
        self.table.delete(id)
    }

    pub fn reset(&self, users: Vec<User>) {
        debug!(count = users.len(), "User table reset");
        self.table.replace_all(users);
    }
}
