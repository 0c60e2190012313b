//! # todo - Terminal To-Do List
//!
//! A single-screen to-do list for the terminal. Add a task, tick it off, edit
//! its title or remove it, with a running counter of items at the top.
//!
//! ## Key Features
//!
//! - **One screen**: an input for new titles above the list, a counter in the
//!   list header, and a status bar.
//! - **Two rule sets**: `full` rejects duplicate titles, asks before removing and
//!   allows editing; `simple` only appends, toggles and removes.
//! - **Headless batch mode**: drive the same list from a script, for pipelines
//!   and quick checks.
//! - **In memory only**: nothing is written to disk. Quit and the list is gone.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive screen
//! todo
//!
//! # Same, without duplicate checks or confirmations
//! todo --variant simple
//!
//! # Run a script and print the result as JSON
//! printf 'add Buy milk\ntoggle 1\n' | todo batch --json
//! ```
//!
//! ## Key Commands
//!
//! - `todo ui` - Interactive screen (the default)
//! - `todo batch [FILE] [--yes] [--json]` - Run add/toggle/remove/edit/list lines
//! - `todo completions <SHELL>` - Shell completion scripts
//!
//! Logging goes to `--log-file` when given. Without it the screen logs nothing
//! and `batch` logs to stderr only when `RUST_LOG` is set (default filter
//! `todo=info`).

use clap::Parser;

pub mod batch;
pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod logging;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod list_view;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Ui));
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let sink = logging::choose_sink(cli.log_file.as_deref(), interactive, rust_log_set);
    if let Err(e) = logging::init(&sink) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        None | Some(Commands::Ui) => cmd_ui(cli.variant),
        Some(Commands::Batch { file, yes, json }) => cmd_batch(cli.variant, file, yes, json),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
    }
}
