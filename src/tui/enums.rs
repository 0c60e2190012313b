//! Enumerations for TUI state management.

/// Which of the two confirmation buttons is highlighted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfirmChoice {
    No,
    Yes,
}

impl ConfirmChoice {
    pub fn flip(self) -> Self {
        match self {
            ConfirmChoice::No => ConfirmChoice::Yes,
            ConfirmChoice::Yes => ConfirmChoice::No,
        }
    }
}

/// Application state for the terminal user interface.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AppState {
    /// Focus on the task list.
    Browse,
    /// Focus on the new-task input.
    Compose,
    /// Editing the title of a task.
    Edit(u64),
    /// Two-choice prompt before removing a task.
    ConfirmRemove { id: u64, choice: ConfirmChoice },
    /// Informational alert. Any key dismisses it and returns to `resume`.
    Alert {
        title: String,
        message: String,
        resume: Box<AppState>,
    },
    Help,
}

/// Requests the list display forwards to the screen, keyed by task identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListIntent {
    Toggle(u64),
    Remove(u64),
    Edit(u64),
}
