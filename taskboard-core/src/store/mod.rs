pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::types::Board;

/// Abstract storage for the board document.
/// Implementations: FileStore (flat file), MemoryStore (tests, embedding).
pub trait BoardStore: Send + Sync {
    /// Read the full board, creating an empty one on first use.
    /// Unreadable or undecodable content is recovered as an empty board;
    /// only initialization failures surface as errors.
    fn load(&self) -> Result<Board, StoreError>;

    /// Serialize the full board and replace the stored document.
    fn save(&self, board: &Board) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode board: {0}")]
    Encode(#[from] serde_json::Error),
}
