use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a task identifier: `task-<ms since epoch>-<6 random lowercase
/// alphanumeric chars>`. Uniqueness is not guaranteed here; the service
/// re-rolls on collision against the loaded board.
pub fn new_task_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let random = Uuid::new_v4();
    let suffix: String = random.as_bytes()[..SUFFIX_LEN]
        .iter()
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect();
    format!("task-{}-{}", millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = new_task_id();
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "task");
        assert!(!parts[1].is_empty());
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_ids_distinct() {
        let ids: HashSet<String> = (0..100).map(|_| new_task_id()).collect();
        assert_eq!(ids.len(), 100);
    }
}
