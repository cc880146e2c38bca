/// Flat-file board storage.
///
/// The whole board lives in one pretty-printed JSON document. Writes are
/// atomic (write to .tmp, fsync, rename). Unreadable or undecodable content
/// is moved aside into a timestamped sibling backup and replaced with an
/// empty board on the next save.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{BoardStore, StoreError};
use crate::types::Board;

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed the file with an empty board if it does not exist yet,
    /// creating parent directories as needed.
    fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let empty = serde_json::to_string_pretty(&Board::default())?;
        Self::atomic_write(&self.path, &empty)?;
        log::info!(
            "[taskboard.store] Initialized board file at {}",
            self.path.display()
        );
        Ok(())
    }

    /// Preserve corrupt content in a timestamped sibling file before the
    /// board resets to empty.
    fn backup_corrupt(&self, content: &str) {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let backup_path = self.path.with_extension(format!("corrupt-{}.json", ts));
        match fs::write(&backup_path, content) {
            Ok(()) => log::warn!(
                "[taskboard.store] Backed up unreadable board data to {}",
                backup_path.display()
            ),
            Err(e) => log::warn!(
                "[taskboard.store] Failed to back up unreadable board data to {}: {}",
                backup_path.display(),
                e
            ),
        }
    }

    /// Atomic write: write to .tmp, fsync, rename, fsync directory.
    fn atomic_write(path: &Path, content: &str) -> Result<(), std::io::Error> {
        let tmp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;

        // fsync directory for rename durability
        if let Some(dir) = path.parent() {
            if let Ok(d) = fs::File::open(dir) {
                let _ = d.sync_all();
            }
        }
        Ok(())
    }
}

impl BoardStore for FileStore {
    fn load(&self) -> Result<Board, StoreError> {
        self.ensure_initialized()?;

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!(
                    "[taskboard.store] Failed to read {}: {}; starting from an empty board",
                    self.path.display(),
                    e
                );
                return Ok(Board::default());
            }
        };

        match serde_json::from_str(&content) {
            Ok(board) => Ok(board),
            Err(e) => {
                log::warn!(
                    "[taskboard.store] Failed to decode {}: {}; starting from an empty board",
                    self.path.display(),
                    e
                );
                self.backup_corrupt(&content);
                Ok(Board::default())
            }
        }
    }

    fn save(&self, board: &Board) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(board)?;
        Self::atomic_write(&self.path, &content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnId, Task};
    use tempfile::tempdir;

    #[test]
    fn test_load_initializes_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let store = FileStore::new(&path);
        let board = store.load().unwrap();

        assert!(path.exists());
        assert_eq!(board, Board::default());

        // The seed document carries all three column keys.
        let on_disk = fs::read_to_string(&path).unwrap();
        for key in ["to-do", "in-progress", "done"] {
            assert!(on_disk.contains(key));
        }
    }

    #[test]
    fn test_load_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("tasks.json");

        let store = FileStore::new(&path);
        store.load().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("tasks.json"));

        let mut board = store.load().unwrap();
        let task = Task::new("task-1-abc123".into(), "Write spec".into(), "".into());
        board
            .column_mut(ColumnId::ToDo)
            .insert(task.id.clone(), task);
        store.save(&board).unwrap();

        assert_eq!(store.load().unwrap(), board);
    }

    #[test]
    fn test_corrupt_file_recovers_empty_with_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        let board = store.load().unwrap();
        assert_eq!(board, Board::default());

        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains("corrupt"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            fs::read_to_string(backups[0].path()).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn test_missing_columns_synthesized_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, r#"{"done": {}}"#).unwrap();

        let store = FileStore::new(&path);
        let board = store.load().unwrap();
        assert!(board.to_do.is_empty());
        assert!(board.in_progress.is_empty());
        assert!(board.done.is_empty());
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let store = FileStore::new(&path);
        let board = store.load().unwrap();
        store.save(&board).unwrap();

        assert!(!dir.path().join("tasks.tmp").exists());
    }
}
