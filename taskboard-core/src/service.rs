/// Task operations over an injected [`BoardStore`].
///
/// Every operation is one load-mutate-save cycle held under a single
/// writer lock, so concurrent requests within the process cannot lose
/// updates to each other.

use std::sync::Mutex;

use crate::id::new_task_id;
use crate::store::{BoardStore, StoreError};
use crate::types::{Board, ColumnId, ColumnTasks, Task};

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Task not found")]
    TaskNotFound(String),

    #[error("Task '{task_id}' not found in source column '{column}'")]
    TaskNotInColumn { task_id: String, column: ColumnId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct BoardService {
    store: Box<dyn BoardStore>,
    /// Serializes whole load-mutate-save cycles. Without it two concurrent
    /// requests race and the last save wins.
    write_lock: Mutex<()>,
}

impl BoardService {
    pub fn new(store: Box<dyn BoardStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// All tasks in one column, keyed by task ID.
    pub fn list_column(&self, column: ColumnId) -> Result<ColumnTasks, BoardError> {
        let _guard = self.write_lock.lock().unwrap();
        let board = self.store.load()?;
        Ok(board.column(column).clone())
    }

    /// The full board document.
    pub fn list_all(&self) -> Result<Board, BoardError> {
        let _guard = self.write_lock.lock().unwrap();
        Ok(self.store.load()?)
    }

    /// Create a task in `column` with a fresh ID and equal timestamps.
    pub fn create(
        &self,
        column: ColumnId,
        title: String,
        description: String,
    ) -> Result<Task, BoardError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut board = self.store.load()?;

        // Re-roll on the (unlikely) ID collision instead of overwriting.
        let mut id = new_task_id();
        while board.contains_task(&id) {
            id = new_task_id();
        }

        let task = Task::new(id.clone(), title, description);
        board.column_mut(column).insert(id, task.clone());
        self.store.save(&board)?;

        log::debug!(
            "[taskboard.service] Created task {} in column {}",
            task.id,
            column
        );
        Ok(task)
    }

    /// Partial update: only supplied fields change; `updated_at` refreshes.
    pub fn update(
        &self,
        task_id: &str,
        mut title: Option<String>,
        mut description: Option<String>,
    ) -> Result<Task, BoardError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut board = self.store.load()?;

        let mut updated: Option<Task> = None;
        for column in ColumnId::ALL {
            if let Some(task) = board.column_mut(column).get_mut(task_id) {
                if let Some(title) = title.take() {
                    task.title = title;
                }
                if let Some(description) = description.take() {
                    task.description = description;
                }
                task.touch();
                updated = Some(task.clone());
                break;
            }
        }

        let task = updated.ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
        self.store.save(&board)?;
        Ok(task)
    }

    /// Move a task between columns. `source == destination` is a no-op move
    /// that still refreshes `updated_at`. A failed move leaves the stored
    /// board unchanged.
    pub fn move_task(
        &self,
        source: ColumnId,
        destination: ColumnId,
        task_id: &str,
    ) -> Result<Task, BoardError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut board = self.store.load()?;

        let mut task = board.column_mut(source).remove(task_id).ok_or_else(|| {
            BoardError::TaskNotInColumn {
                task_id: task_id.to_string(),
                column: source,
            }
        })?;

        task.touch();
        board
            .column_mut(destination)
            .insert(task.id.clone(), task.clone());
        self.store.save(&board)?;

        log::debug!(
            "[taskboard.service] Moved task {} from {} to {}",
            task.id,
            source,
            destination
        );
        Ok(task)
    }

    /// Remove a task from whichever column holds it and return it.
    pub fn delete(&self, task_id: &str) -> Result<Task, BoardError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut board = self.store.load()?;

        let (column, task) = board
            .remove_task(task_id)
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
        self.store.save(&board)?;

        log::debug!(
            "[taskboard.service] Deleted task {} from column {}",
            task.id,
            column
        );
        Ok(task)
    }
}
