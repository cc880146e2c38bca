use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// The fixed set of workflow columns. Anything else on the wire is
/// rejected before it reaches the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnId {
    #[serde(rename = "to-do")]
    ToDo,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl ColumnId {
    pub const ALL: [ColumnId; 3] = [ColumnId::ToDo, ColumnId::InProgress, ColumnId::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::ToDo => "to-do",
            ColumnId::InProgress => "in-progress",
            ColumnId::Done => "done",
        }
    }

    /// Comma-separated list of the valid column names, for error messages.
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid column '{0}'")]
pub struct InvalidColumn(pub String);

impl FromStr for ColumnId {
    type Err = InvalidColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to-do" => Ok(ColumnId::ToDo),
            "in-progress" => Ok(ColumnId::InProgress),
            "done" => Ok(ColumnId::Done),
            other => Err(InvalidColumn(other.to_string())),
        }
    }
}

/// Tasks keyed by task ID, the shape each column takes in the persisted
/// document and in column-level API responses.
pub type ColumnTasks = BTreeMap<String, Task>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unix seconds with sub-second precision, set once at creation.
    pub created_at: f64,
    /// Refreshed on every mutation, including moves.
    pub updated_at: f64,
}

impl Task {
    /// Build a freshly created task; both timestamps start equal.
    pub fn new(id: String, title: String, description: String) -> Self {
        let now = now_secs();
        Self {
            id,
            title,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = now_secs();
    }
}

/// The full board document. Serializes to the flat-file layout: one
/// top-level key per fixed column, each mapping task ID to task. Columns
/// missing from a stored document come back as empty maps, so the board
/// always holds exactly the three fixed columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "to-do", default)]
    pub to_do: ColumnTasks,
    #[serde(rename = "in-progress", default)]
    pub in_progress: ColumnTasks,
    #[serde(default)]
    pub done: ColumnTasks,
}

impl Board {
    pub fn column(&self, id: ColumnId) -> &ColumnTasks {
        match id {
            ColumnId::ToDo => &self.to_do,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, id: ColumnId) -> &mut ColumnTasks {
        match id {
            ColumnId::ToDo => &mut self.to_do,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Done => &mut self.done,
        }
    }

    /// Locate a task anywhere on the board. A task ID lives in at most one
    /// column, so the first match is the only match.
    pub fn find_task(&self, task_id: &str) -> Option<(ColumnId, &Task)> {
        ColumnId::ALL
            .iter()
            .find_map(|&col| self.column(col).get(task_id).map(|t| (col, t)))
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.find_task(task_id).is_some()
    }

    /// Remove a task from whichever column holds it.
    pub fn remove_task(&mut self, task_id: &str) -> Option<(ColumnId, Task)> {
        for col in ColumnId::ALL {
            if let Some(task) = self.column_mut(col).remove(task_id) {
                return Some((col, task));
            }
        }
        None
    }
}

/// Current Unix timestamp in seconds with sub-second precision, the
/// resolution used for `created_at` / `updated_at`.
pub fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_parse() {
        assert_eq!("to-do".parse::<ColumnId>().unwrap(), ColumnId::ToDo);
        assert_eq!(
            "in-progress".parse::<ColumnId>().unwrap(),
            ColumnId::InProgress
        );
        assert_eq!("done".parse::<ColumnId>().unwrap(), ColumnId::Done);
        assert!("backlog".parse::<ColumnId>().is_err());
        assert!("To-Do".parse::<ColumnId>().is_err());
    }

    #[test]
    fn test_board_wire_keys() {
        let json = serde_json::to_value(Board::default()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["to-do", "in-progress", "done"]);
    }

    #[test]
    fn test_missing_columns_deserialize_empty() {
        let board: Board = serde_json::from_str(r#"{"done": {}}"#).unwrap();
        assert!(board.to_do.is_empty());
        assert!(board.in_progress.is_empty());
        assert!(board.done.is_empty());
    }

    #[test]
    fn test_task_description_defaults_empty() {
        let task: Task = serde_json::from_str(
            r#"{"id":"task-1-aaaaaa","title":"T","created_at":1.5,"updated_at":2.5}"#,
        )
        .unwrap();
        assert_eq!(task.description, "");
    }

    #[test]
    fn test_find_and_remove_task() {
        let mut board = Board::default();
        let task = Task::new("task-1-abc123".into(), "T".into(), "".into());
        board
            .column_mut(ColumnId::InProgress)
            .insert(task.id.clone(), task.clone());

        let (col, found) = board.find_task("task-1-abc123").unwrap();
        assert_eq!(col, ColumnId::InProgress);
        assert_eq!(found.title, "T");

        let (col, removed) = board.remove_task("task-1-abc123").unwrap();
        assert_eq!(col, ColumnId::InProgress);
        assert_eq!(removed, task);
        assert!(!board.contains_task("task-1-abc123"));
        assert!(board.remove_task("task-1-abc123").is_none());
    }
}
