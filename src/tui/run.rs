//! TUI entry point and terminal setup.

use std::io::{self, Write};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::{info, warn};

use crate::error::Result;
use crate::fields::Variant;
use crate::tui::app::App;

/// Puts the terminal into raw mode on the alternate screen and undoes it on drop.
///
/// Restoration runs on every exit path, including early returns and panics.
/// Each step is attempted even when an earlier one fails.
pub struct TerminalGuard<W: Write> {
    writer: W,
    raw_mode: bool,
    alternate_screen: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn new(writer: W) -> Self {
        TerminalGuard {
            writer,
            raw_mode: false,
            alternate_screen: false,
        }
    }

    /// Enable raw mode and switch to the alternate screen.
    pub fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        self.raw_mode = true;
        execute!(self.writer, EnterAlternateScreen)?;
        self.alternate_screen = true;
        Ok(())
    }

    /// Undo whatever `enter` managed to set up. Safe to call more than once.
    pub fn restore(&mut self) {
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                warn!(error = %e, "failed to disable raw mode");
            }
            self.raw_mode = false;
        }
        if self.alternate_screen {
            if let Err(e) = execute!(self.writer, LeaveAlternateScreen) {
                warn!(error = %e, "failed to leave alternate screen");
            }
            if let Err(e) = execute!(self.writer, Show) {
                warn!(error = %e, "failed to show cursor");
            }
            self.alternate_screen = false;
        }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Initialise and run the terminal user interface.
pub fn run_tui(variant: Variant) -> Result<()> {
    let mut guard = TerminalGuard::new(io::stdout());
    guard.enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    info!(?variant, "starting ui");
    let mut app = App::new(variant);
    let result = app.run(&mut terminal);

    drop(terminal);
    guard.restore();

    info!(tasks = app.tasks().len(), "ui closed");
    result
}
