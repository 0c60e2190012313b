//! Headless runner that drives the task list from a line-oriented script.
//!
//! One command per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! add Buy milk
//! toggle 1
//! edit 1 Buy oat milk
//! remove 1
//! list
//! ```
//!
//! Removal confirmation is answered by `assume_yes`. Duplicate titles and
//! unknown identifiers are reported as notes and the script carries on; a
//! malformed line stops it. With JSON output, `list` lines are skipped and the
//! final list is written as one document.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Result, TodoError};
use crate::fields::Variant;
use crate::store::{format_counter, truncate, TaskList};

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchCommand {
    Add(String),
    Toggle(u64),
    Remove(u64),
    Edit(u64, String),
    List,
}

fn parse_id(raw: &str, line: usize) -> Result<u64> {
    raw.parse().map_err(|_| TodoError::Batch {
        line,
        message: format!("'{}' is not a task id", raw),
    })
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<BatchCommand>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (trimmed, ""),
    };
    let missing = |what: &str| TodoError::Batch {
        line,
        message: format!("'{}' needs {}", cmd, what),
    };

    let command = match cmd {
        "add" => {
            if rest.is_empty() {
                return Err(missing("a title"));
            }
            BatchCommand::Add(rest.to_string())
        }
        "toggle" | "remove" => {
            if rest.is_empty() {
                return Err(missing("a task id"));
            }
            let id = parse_id(rest, line)?;
            if cmd == "toggle" {
                BatchCommand::Toggle(id)
            } else {
                BatchCommand::Remove(id)
            }
        }
        "edit" => {
            let (id, title) = match rest.split_once(char::is_whitespace) {
                Some((id, title)) => (id, title.trim()),
                None => return Err(missing("a task id and a title")),
            };
            BatchCommand::Edit(parse_id(id, line)?, title.to_string())
        }
        "list" => BatchCommand::List,
        other => {
            return Err(TodoError::Batch {
                line,
                message: format!("unknown command '{}'", other),
            })
        }
    };
    Ok(Some(command))
}

/// Executes script commands against a fresh task list.
pub struct BatchRunner<W: Write> {
    list: TaskList,
    assume_yes: bool,
    json: bool,
    out: W,
    notes: Vec<String>,
}

impl<W: Write> BatchRunner<W> {
    pub fn new(variant: Variant, assume_yes: bool, json: bool, out: W) -> Self {
        BatchRunner {
            list: TaskList::new(variant),
            assume_yes,
            json,
            out,
            notes: Vec::new(),
        }
    }

    /// Warnings and declined actions collected while running.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    fn note(&mut self, msg: String) {
        debug!(note = %msg, "batch note");
        self.notes.push(msg);
    }

    /// Apply a single command to the list.
    pub fn execute(&mut self, command: BatchCommand) -> Result<()> {
        match command {
            BatchCommand::Add(title) => {
                if let Err(e) = self.list.add(title) {
                    self.note(format!("warning: {}", e));
                }
            }
            BatchCommand::Toggle(id) => {
                if self.list.toggle(id).is_none() {
                    self.note(format!("no task #{}", id));
                }
            }
            BatchCommand::Remove(id) => {
                if self.list.get(id).is_none() {
                    self.note(format!("no task #{}", id));
                } else if self.list.variant().confirms_removal() && !self.assume_yes {
                    self.note(format!("removal of #{} not confirmed (pass --yes)", id));
                } else {
                    self.list.remove(id);
                }
            }
            BatchCommand::Edit(id, title) => match self.list.edit(id, title) {
                Ok(Some(_)) => {}
                Ok(None) => self.note(format!("no task #{}", id)),
                Err(e) => self.note(format!("warning: {}", e)),
            },
            // JSON output is a single document written once the script ends.
            BatchCommand::List if self.json => {}
            BatchCommand::List => self.print()?,
        }
        Ok(())
    }

    /// Run every line of `reader`, then print the final list.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(command) = parse_line(&line, idx + 1)? {
                self.execute(command)?;
            }
        }
        self.print()
    }

    /// Print the list as a table with a counter, or as JSON.
    pub fn print(&mut self) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut self.out, self.list.tasks())?;
            writeln!(self.out)?;
            return Ok(());
        }
        writeln!(self.out, "{:<5} {:<5} {}", "ID", "Done", "Title")?;
        for t in self.list.tasks() {
            writeln!(self.out, "{:<5} {:<5} {}", t.id, t.done_marker(), truncate(&t.title, 60))?;
        }
        writeln!(self.out, "{}", format_counter(self.list.len(), self.list.done_count()))?;
        Ok(())
    }
}
