//! Behaviour variants for the task list.
//!
//! The list ships in two flavours. `Full` rejects duplicate titles, asks before
//! removing and allows titles to be edited; `Simple` does none of that.

use clap::ValueEnum;

/// Selects which set of list rules is active.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum Variant {
    /// Duplicate rejection, confirmed removal and title editing.
    #[default]
    Full,
    /// Append, toggle and unconditional removal only.
    Simple,
}

impl Variant {
    /// Whether adding a title that already exists is refused.
    pub fn rejects_duplicates(self) -> bool {
        self == Variant::Full
    }

    /// Whether removal must be confirmed by the user first.
    pub fn confirms_removal(self) -> bool {
        self == Variant::Full
    }

    /// Whether task titles can be edited after creation.
    pub fn allows_edit(self) -> bool {
        self == Variant::Full
    }
}

pub fn format_variant(v: Variant) -> &'static str {
    match v {
        Variant::Full => "Full",
        Variant::Simple => "Simple",
    }
}
