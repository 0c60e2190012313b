//! The in-memory task list and its formatting helpers.
//!
//! `TaskList` is the single owner of the task sequence. Every interaction
//! surface (the TUI screen, the batch runner) goes through the four operations
//! defined here: add, toggle, remove and edit.

use tracing::{debug, info, warn};

use crate::error::{Result, TodoError};
use crate::fields::Variant;
use crate::task::Task;

/// Ordered, in-memory list of tasks. Insertion order is display order.
#[derive(Debug)]
pub struct TaskList {
    tasks: Vec<Task>,
    variant: Variant,
    next_id: u64,
}

impl TaskList {
    /// Create an empty list following the rules of `variant`.
    pub fn new(variant: Variant) -> Self {
        TaskList {
            tasks: Vec::new(),
            variant,
            next_id: 1,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks marked as done.
    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        self.tasks.get_mut(idx)
    }

    /// Issue the next identifier. Identifiers are never reused, even after removals.
    fn issue_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a new open task.
    ///
    /// Under the full variant a title that exactly matches an existing task is
    /// refused with [`TodoError::DuplicateTitle`] and the list is left as it was.
    pub fn add(&mut self, title: impl Into<String>) -> Result<&Task> {
        let title = title.into();
        if self.variant.rejects_duplicates() && self.tasks.iter().any(|t| t.title == title) {
            warn!(%title, "duplicate task title rejected");
            return Err(TodoError::DuplicateTitle(title));
        }

        let id = self.issue_id();
        info!(id, %title, "task added");
        self.tasks.push(Task::new(id, title));
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip the completion flag of a task, returning the new value.
    ///
    /// Unknown identifiers leave the list untouched.
    pub fn toggle(&mut self, id: u64) -> Option<bool> {
        match self.get_mut(id) {
            Some(task) => {
                task.done = !task.done;
                debug!(id, done = task.done, "task toggled");
                Some(task.done)
            }
            None => {
                debug!(id, "toggle ignored, no such task");
                None
            }
        }
    }

    /// Remove a task and hand it back. Any confirmation has to happen before this call.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let idx = match self.tasks.iter().position(|t| t.id == id) {
            Some(idx) => idx,
            None => {
                debug!(id, "remove ignored, no such task");
                return None;
            }
        };
        let task = self.tasks.remove(idx);
        info!(id, title = %task.title, "task removed");
        Some(task)
    }

    /// Replace the title of a task. `done` and the identifier are preserved.
    ///
    /// Returns `Ok(None)` when no task has that identifier.
    pub fn edit(&mut self, id: u64, new_title: impl Into<String>) -> Result<Option<&Task>> {
        if !self.variant.allows_edit() {
            return Err(TodoError::EditingDisabled);
        }
        let new_title = new_title.into();
        match self.get_mut(id) {
            Some(task) => {
                info!(id, from = %task.title, to = %new_title, "task edited");
                task.title = new_title;
                Ok(Some(&*task))
            }
            None => {
                debug!(id, "edit ignored, no such task");
                Ok(None)
            }
        }
    }
}

/// Human friendly task counter, e.g. "You have 3 tasks (1 done)".
pub fn format_counter(total: usize, done: usize) -> String {
    let noun = if total == 1 { "task" } else { "tasks" };
    if done > 0 {
        format!("You have {} {} ({} done)", total, noun, done)
    } else {
        format!("You have {} {}", total, noun)
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
