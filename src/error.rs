//! Error types shared across the crate.

use thiserror::Error;

/// Everything that can go wrong while driving the task list.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("a task titled '{0}' already exists")]
    DuplicateTitle(String),

    #[error("editing is not available in the simple variant")]
    EditingDisabled,

    #[error("line {line}: {message}")]
    Batch { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TodoError>;
