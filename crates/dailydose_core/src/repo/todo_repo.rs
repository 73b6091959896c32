//! Todo collection.

use crate::model::todo::{Priority, TodoItem};
use crate::model::validation::ValidationError;
use crate::repo::collection::{CollectionRepository, Record, RepoResult};
use crate::store::Slot;

pub const TODO_ITEMS_SLOT: Slot = Slot::new("todo_data", "todo_items");

impl Record for TodoItem {
    const SLOT: Slot = TODO_ITEMS_SLOT;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        TodoItem::validate(self)
    }
}

pub type TodoRepository<'store> = CollectionRepository<'store, TodoItem>;

impl TodoRepository<'_> {
    pub fn active(&self) -> RepoResult<Vec<TodoItem>> {
        self.find_by(|todo| !todo.is_completed)
    }

    pub fn completed(&self) -> RepoResult<Vec<TodoItem>> {
        self.find_by(|todo| todo.is_completed)
    }

    /// Exact, case-sensitive category match.
    pub fn by_category(&self, category: &str) -> RepoResult<Vec<TodoItem>> {
        self.find_by(|todo| todo.category == category)
    }

    pub fn by_priority(&self, priority: Priority) -> RepoResult<Vec<TodoItem>> {
        self.find_by(|todo| todo.priority == priority)
    }

    /// Flips `is_completed`. Returns `false` when the todo does not exist.
    pub fn toggle_completion(&self, todo_id: &str) -> RepoResult<bool> {
        self.modify(todo_id, |todo| todo.is_completed = !todo.is_completed)
    }
}
