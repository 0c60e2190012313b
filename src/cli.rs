use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::Variant;

/// In-memory to-do list for the terminal.
/// Nothing is saved; the list lives as long as the process.
#[derive(Parser)]
#[command(name = "todo", version, about = "Single-screen terminal to-do list")]
pub struct Cli {
    /// Rule set: full (no duplicates, confirmed removal, editing) or simple.
    #[arg(long, global = true, value_enum, default_value_t = Variant::Full)]
    pub variant: Variant,

    /// Append log events to this file. RUST_LOG controls the filter.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
