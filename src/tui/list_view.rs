//! Task list display.
//!
//! Renders the current tasks with a counter and turns key presses into
//! [`ListIntent`]s. It never changes the tasks itself; the screen that owns
//! the list decides what an intent does.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::store::format_counter;
use crate::task::Task;
use crate::tui::colors::{DONE_GREEN, PURPLE};
use crate::tui::enums::ListIntent;

/// Selection cursor over the rendered tasks.
#[derive(Default)]
pub struct TaskListView {
    state: TableState,
}

impl TaskListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of the highlighted task, if any.
    pub fn selected_id(&self, tasks: &[Task]) -> Option<u64> {
        self.state.selected().and_then(|i| tasks.get(i)).map(|t| t.id)
    }

    /// Highlight the task with the given identifier.
    pub fn select_id(&mut self, tasks: &[Task], id: u64) {
        if let Some(idx) = tasks.iter().position(|t| t.id == id) {
            self.state.select(Some(idx));
        }
    }

    /// Keep the selection inside a list of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }

    fn move_by(&mut self, len: usize, forward: bool) {
        if len == 0 {
            return;
        }
        let next = match self.state.selected() {
            Some(i) if forward => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.state.select(Some(next));
    }

    /// Translate a key into an intent for the selected task.
    ///
    /// Navigation keys only move the highlight and yield `None`.
    pub fn intent_for_key(&mut self, key: KeyCode, tasks: &[Task]) -> Option<ListIntent> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.move_by(tasks.len(), false),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(tasks.len(), true),
            KeyCode::Home | KeyCode::Char('g') => {
                if !tasks.is_empty() {
                    self.state.select(Some(0));
                }
            }
            KeyCode::End | KeyCode::Char('G') => {
                if !tasks.is_empty() {
                    self.state.select(Some(tasks.len() - 1));
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('x') => {
                return self.selected_id(tasks).map(ListIntent::Toggle);
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                return self.selected_id(tasks).map(ListIntent::Remove);
            }
            KeyCode::Char('e') => {
                return self.selected_id(tasks).map(ListIntent::Edit);
            }
            _ => {}
        }
        None
    }

    /// Render the counter and the task table into `area`.
    pub fn render(&mut self, f: &mut Frame, area: Rect, tasks: &[Task], focused: bool) {
        let done = tasks.iter().filter(|t| t.done).count();

        let rows: Vec<Row> = tasks
            .iter()
            .map(|task| {
                let style = if task.done {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                let marker_style = if task.done {
                    Style::default().fg(DONE_GREEN).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Row::new(vec![
                    Cell::from(task.done_marker()).style(marker_style),
                    Cell::from(task.title.clone()).style(style),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4), // Marker
            Constraint::Min(10),   // Title
        ];

        let border_style = if focused {
            Style::default().fg(PURPLE)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let table = Table::new(rows, widths)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(format_counter(tasks.len(), done)),
            )
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.state);
    }
}
