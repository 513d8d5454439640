//! Task CRUD over an in-memory table.

use testapi_core::requests::{TaskCreate, TaskUpdate};
use testapi_core::Task;
use tracing::debug;

use super::Table;

/// Repository for task operations.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    table: Table<Task>,
}

impl TaskRepository {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskRepository {
            table: Table::new(tasks),
        }
    }

    pub fn all(&self) -> Vec<Task> {
        self.table.all()
    }

    pub fn get(&self, id: i64) -> Option<Task> {
        self.table.get(id)
    }

    /// Stores a new task with id `max + 1` (1 when empty).
    pub fn create(&self, input: TaskCreate) -> Task {
        let task = self.table.insert_with(1, |id| input.into_task(id));
        debug!(id = task.id, "Task created");
        task
    }

    pub fn update(&self, id: i64, changes: TaskUpdate) -> Option<Task> {
        self.table.update(id, |task| changes.apply_to(task))
    }

    pub fn delete(&self, id: i64) -> Option<Task> {
        self.table.delete(id)
    }

    pub fn reset(&self, tasks: Vec<Task>) {
        self.table.replace_all(tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_create_after_seed() {
        let repo = TaskRepository::new(seed::tasks());
        let task = repo.create(TaskCreate {
            desc: "Review PR".to_string(),
            completed: false,
        });
        assert_eq!(task.id, 4);
        assert_eq!(repo.all().len(), 4);
    }

    #[test]
    fn test_update_and_delete() {
        let repo = TaskRepository::new(seed::tasks());
        let changes = TaskUpdate {
            desc: None,
            completed: Some(true),
        };
        assert!(repo.update(2, changes).unwrap().completed);

        assert_eq!(repo.delete(3).unwrap().desc, "Document work");
        assert!(repo.get(3).is_none());
    }
}
