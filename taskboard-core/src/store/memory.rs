use std::sync::Mutex;

use super::{BoardStore, StoreError};
use crate::types::Board;

/// In-process board storage. Used by tests and embedders that want the
/// service without a filesystem behind it.
#[derive(Default)]
pub struct MemoryStore {
    board: Mutex<Board>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardStore for MemoryStore {
    fn load(&self) -> Result<Board, StoreError> {
        Ok(self.board.lock().unwrap().clone())
    }

    fn save(&self, board: &Board) -> Result<(), StoreError> {
        *self.board.lock().unwrap() = board.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnId, Task};

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), Board::default());

        let mut board = Board::default();
        let task = Task::new("task-1-abc123".into(), "T".into(), "".into());
        board
            .column_mut(ColumnId::Done)
            .insert(task.id.clone(), task);
        store.save(&board).unwrap();

        assert_eq!(store.load().unwrap(), board);
    }
}
