//! Command implementations for the CLI interface.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::batch::BatchRunner;
use crate::error::Result;
use crate::fields::Variant;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (default).
    Ui,

    /// Run a script of add/toggle/remove/edit/list lines and print the result.
    Batch {
        /// Script file. Reads stdin when omitted.
        file: Option<PathBuf>,
        /// Confirm every removal.
        #[arg(long, short = 'y')]
        yes: bool,
        /// Print the final list as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(variant: Variant) {
    if let Err(e) = run_tui(variant) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

fn run_batch(variant: Variant, file: Option<PathBuf>, yes: bool, json: bool) -> Result<()> {
    let mut runner = BatchRunner::new(variant, yes, json, io::stdout().lock());
    let outcome = match file {
        Some(path) => runner.run(BufReader::new(File::open(path)?)),
        None => runner.run(io::stdin().lock()),
    };
    for note in runner.notes() {
        eprintln!("{}", note);
    }
    outcome
}

/// Run a batch script against a fresh list.
pub fn cmd_batch(variant: Variant, file: Option<PathBuf>, yes: bool, json: bool) {
    if let Err(e) = run_batch(variant, file, yes, json) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}
