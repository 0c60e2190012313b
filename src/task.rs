//! Task data structure.
//!
//! A `Task` is the single record the list holds: an identifier, a title and a
//! completion flag, plus the moment it was created.

use serde::Serialize;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub done: bool,
    pub created_at_utc: i64,
}

impl Task {
    /// Create an open task with the given identifier and title.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            done: false,
            created_at_utc: chrono::Utc::now().timestamp(),
        }
    }

    /// Marker used by the list renderers.
    pub fn done_marker(&self) -> &'static str {
        if self.done { "[x]" } else { "[ ]" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_open() {
        let task = Task::new(7, "Buy milk");
        assert_eq!(task.id, 7);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.done);
        assert_eq!(task.done_marker(), "[ ]");
    }

    #[test]
    fn test_serializes_done_flag() {
        let mut task = Task::new(1, "Walk dog");
        task.done = true;
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["done"], true);
        assert_eq!(json["title"], "Walk dog");
    }
}
