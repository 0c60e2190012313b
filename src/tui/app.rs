//! Main application logic for the terminal user interface.
//!
//! `App` owns the task list and is the only place it is mutated. The input
//! field and the list display report back to it: a submitted title, or an
//! intent carrying a task identifier.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::error::{Result, TodoError};
use crate::fields::{format_variant, Variant};
use crate::store::TaskList;
use crate::tui::{
    colors::{AMBER, DARK_RED, PURPLE, SLATE},
    enums::{AppState, ConfirmChoice, ListIntent},
    input::TodoInput,
    list_view::TaskListView,
    utils::centered_rect,
};

const DUPLICATE_ALERT_TITLE: &str = "Task already exists";
const DUPLICATE_ALERT_MESSAGE: &str = "You cannot add a task with the same title";

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    tasks: TaskList,
    input: TodoInput,
    editor: TodoInput,
    list_view: TaskListView,
    status_message: String,
}

impl App {
    /// Create a screen with an empty list following the rules of `variant`.
    pub fn new(variant: Variant) -> Self {
        App {
            state: AppState::Browse,
            tasks: TaskList::new(variant),
            input: TodoInput::new(),
            editor: TodoInput::new(),
            list_view: TaskListView::new(),
            status_message: String::new(),
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Set a status message to display in the status bar.
    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Add a task from a submitted title, raising the duplicate alert when refused.
    fn add_task(&mut self, title: String) {
        match self.tasks.add(title) {
            Ok(task) => {
                let (id, msg) = (task.id, format!("Added \"{}\"", task.title));
                self.list_view.select_id(self.tasks.tasks(), id);
                self.set_status_message(msg);
            }
            Err(TodoError::DuplicateTitle(_)) => {
                let resume = Box::new(self.state.clone());
                self.state = AppState::Alert {
                    title: DUPLICATE_ALERT_TITLE.to_string(),
                    message: DUPLICATE_ALERT_MESSAGE.to_string(),
                    resume,
                };
            }
            Err(e) => self.set_status_message(format!("Error: {}", e)),
        }
    }

    fn remove_task(&mut self, id: u64) {
        if let Some(task) = self.tasks.remove(id) {
            self.set_status_message(format!("Removed \"{}\"", task.title));
        }
        self.list_view.clamp(self.tasks.len());
    }

    /// Carry out an intent forwarded by the list display.
    fn apply_intent(&mut self, intent: ListIntent) {
        debug!(?intent, "list intent");
        match intent {
            ListIntent::Toggle(id) => {
                self.tasks.toggle(id);
            }
            ListIntent::Remove(id) => {
                if self.tasks.variant().confirms_removal() {
                    self.state = AppState::ConfirmRemove {
                        id,
                        choice: ConfirmChoice::No,
                    };
                } else {
                    self.remove_task(id);
                }
            }
            ListIntent::Edit(id) => {
                if !self.tasks.variant().allows_edit() {
                    self.set_status_message("Editing is not available in the simple variant".to_string());
                    return;
                }
                if let Some(task) = self.tasks.get(id) {
                    self.editor = TodoInput::with_value(&task.title);
                    self.state = AppState::Edit(id);
                }
            }
        }
    }

    /// Handle keyboard input when the task list has focus.
    ///
    /// Returns true if the application should quit.
    fn handle_browse_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => {
                self.state = AppState::Compose;
            }
            KeyCode::Char('?') | KeyCode::Char('h') => {
                self.state = AppState::Help;
            }
            _ => {
                if let Some(intent) = self.list_view.intent_for_key(key, self.tasks.tasks()) {
                    self.apply_intent(intent);
                }
            }
        }
        false
    }

    /// Handle keyboard input while composing a new task.
    fn handle_compose_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Tab => {
                self.state = AppState::Browse;
            }
            KeyCode::Enter => {
                if let Some(title) = self.input.submit() {
                    self.add_task(title);
                }
            }
            other => {
                self.input.handle_key(other);
            }
        }
    }

    /// Handle keyboard input while editing the title of task `id`.
    fn handle_edit_input(&mut self, key: KeyCode, id: u64) {
        match key {
            KeyCode::Esc => {
                self.editor.clear();
                self.state = AppState::Browse;
            }
            KeyCode::Enter => {
                let Some(title) = self.editor.submit() else {
                    self.set_status_message("Title cannot be empty".to_string());
                    self.state = AppState::Browse;
                    return;
                };
                match self.tasks.edit(id, title) {
                    Ok(Some(task)) => {
                        let msg = format!("Renamed to \"{}\"", task.title);
                        self.set_status_message(msg);
                    }
                    Ok(None) => {}
                    Err(e) => self.set_status_message(format!("Error: {}", e)),
                }
                self.state = AppState::Browse;
            }
            other => {
                self.editor.handle_key(other);
            }
        }
    }

    /// Handle keyboard input in the removal confirmation prompt.
    fn handle_confirm_input(&mut self, key: KeyCode, id: u64, choice: ConfirmChoice) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.remove_task(id);
                self.state = AppState::Browse;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = AppState::Browse;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.state = AppState::ConfirmRemove {
                    id,
                    choice: choice.flip(),
                };
            }
            KeyCode::Enter => {
                if choice == ConfirmChoice::Yes {
                    self.remove_task(id);
                }
                self.state = AppState::Browse;
            }
            _ => {}
        }
    }

    /// Process one key event.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        self.status_message.clear();

        match self.state.clone() {
            AppState::Browse => return Ok(self.handle_browse_input(key.code)),
            AppState::Compose => self.handle_compose_input(key.code),
            AppState::Edit(id) => self.handle_edit_input(key.code, id),
            AppState::ConfirmRemove { id, choice } => self.handle_confirm_input(key.code, id, choice),
            AppState::Alert { resume, .. } => self.state = *resume,
            AppState::Help => self.state = AppState::Browse,
        }
        Ok(false)
    }

    /// Poll for a keyboard event and dispatch it.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return self.handle_key(key);
            }
        }
        Ok(false)
    }

    /// Render the header banner.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TO-DO", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{} variant", format_variant(self.tasks.variant())),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]))
        .style(Style::default().bg(PURPLE).fg(Color::White))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render the input field for new tasks, or the title editor while editing.
    fn render_input(&self, f: &mut Frame, area: Rect) {
        let (field, title, focused) = match self.state {
            AppState::Edit(id) => (&self.editor, format!("Edit task #{}", id), true),
            AppState::Compose => (&self.input, "Add new task".to_string(), true),
            _ => (&self.input, "Add new task (press 'a')".to_string(), false),
        };
        let border = if focused {
            Style::default().fg(PURPLE)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default().borders(Borders::ALL).border_style(border).title(title);
        let inner = block.inner(area);
        let (scroll, cursor_x) = field.viewport(inner.width);
        let paragraph = Paragraph::new(field.value.as_str())
            .scroll((0, scroll))
            .block(block);
        f.render_widget(paragraph, area);

        if focused {
            f.set_cursor_position((inner.x + cursor_x, inner.y));
        }
    }

    /// Render the two-choice removal prompt.
    fn render_confirm(&self, f: &mut Frame, area: Rect, id: u64, choice: ConfirmChoice) {
        let block = Block::default()
            .title("Remove item")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let title = self.tasks.get(id).map(|t| t.title.as_str()).unwrap_or("");
        let selected = Style::default().bg(Color::White).fg(Color::Black).add_modifier(Modifier::BOLD);
        let (no_style, yes_style) = match choice {
            ConfirmChoice::No => (selected, Style::default()),
            ConfirmChoice::Yes => (Style::default(), selected),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Are you sure you want to remove this item?",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(title),
            Line::from(""),
            Line::from(vec![
                Span::styled(" No ", no_style),
                Span::raw("   "),
                Span::styled(" Yes ", yes_style),
            ]),
            Line::from(""),
            Line::from("y/n, or ←/→ and Enter"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render an informational alert.
    fn render_alert(&self, f: &mut Frame, area: Rect, title: &str, message: &str) {
        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(message),
            Line::from(""),
            Line::from("Press any key to continue"),
        ])
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Black).bg(AMBER)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(vec![Span::styled(
                "To-Do Help",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("  a/i/Tab      Add a new task"),
            Line::from("  ↑/↓, k/j     Move selection"),
            Line::from("  Space/Enter  Toggle done"),
            Line::from("  e            Edit title"),
            Line::from("  d/Delete     Remove task"),
            Line::from("  ?/h          Show this help"),
            Line::from("  q/Esc/Ctrl+C Quit"),
            Line::from(""),
            Line::from("  In the input: Enter to submit, Esc to return to the list"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Browse => "Press 'a' to add, 'h' for help".to_string(),
                AppState::Compose => "Enter to add, Esc to return".to_string(),
                AppState::Edit(_) => "Enter to save, Esc to cancel".to_string(),
                AppState::ConfirmRemove { .. } => "Confirm removal".to_string(),
                AppState::Alert { .. } => "Alert".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(SLATE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Input
                Constraint::Min(0),    // Tasks
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        if self.state == AppState::Help {
            self.render_help(f, chunks[2]);
        } else {
            let list_focused = !matches!(self.state, AppState::Compose | AppState::Edit(_));
            self.render_header(f, chunks[0]);
            self.render_input(f, chunks[1]);
            self.list_view.render(f, chunks[2], self.tasks.tasks(), list_focused);
        }

        let full = f.area();
        match &self.state {
            AppState::ConfirmRemove { id, choice } => self.render_confirm(f, full, *id, *choice),
            AppState::Alert { title, message, .. } => self.render_alert(f, full, title, message),
            _ => {}
        }

        self.render_status_bar(f, chunks[3]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut App, title: &str) {
        press(app, KeyCode::Char('a'));
        type_str(app, title);
        press(app, KeyCode::Enter);
        press(app, KeyCode::Esc);
    }

    fn render_to_string(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buf = terminal.backend().buffer();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_compose_adds_task() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "  Buy milk ");
        assert_eq!(app.tasks().len(), 1);
        let task = &app.tasks().tasks()[0];
        assert_eq!(task.title, "Buy milk");
        assert!(!task.done);
        assert_eq!(&app.state, &AppState::Browse);
    }

    #[test]
    fn test_blank_submission_ignored() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "   ");
        assert!(app.tasks().is_empty());
    }

    #[test]
    fn test_letters_go_to_input_while_composing() {
        let mut app = App::new(Variant::Full);
        press(&mut app, KeyCode::Char('a'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tasks().tasks()[0].title, "q");
    }

    #[test]
    fn test_duplicate_raises_alert() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "Buy milk");
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(&app.state, AppState::Alert { .. }));
        assert_eq!(app.tasks().len(), 1);

        let screen = render_to_string(&mut app, 80, 24);
        assert!(screen.contains(DUPLICATE_ALERT_TITLE));

        press(&mut app, KeyCode::Char('z'));
        assert_eq!(&app.state, &AppState::Compose);
        assert_eq!(app.tasks().len(), 1);

        type_str(&mut app, "Buy bread");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tasks().len(), 2);
    }

    #[test]
    fn test_blank_edit_keeps_title() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "z");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tasks().tasks()[0].title, "z");
        assert_eq!(&app.state, &AppState::Browse);
        assert_eq!(app.status_message, "Title cannot be empty");
    }

    #[test]
    fn test_help_opens_and_closes() {
        let mut app = App::new(Variant::Full);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(&app.state, &AppState::Help);
        assert!(render_to_string(&mut app, 80, 24).contains("To-Do Help"));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(&app.state, &AppState::Browse);

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(&app.state, &AppState::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(&app.state, &AppState::Browse);
    }

    #[test]
    fn test_long_input_scrolls_to_cursor() {
        let mut app = App::new(Variant::Full);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, &"x".repeat(40));
        type_str(&mut app, "END");
        let screen = render_to_string(&mut app, 30, 12);
        assert!(screen.contains("END"));
    }

    #[test]
    fn test_toggle_selected() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "a");
        add(&mut app, "b");
        // selection follows the last added task
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.tasks().tasks()[0].done);
        assert!(app.tasks().tasks()[1].done);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert!(app.tasks().tasks()[0].done);
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "Buy milk");

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(&app.state, AppState::ConfirmRemove { choice: ConfirmChoice::No, .. }));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tasks().len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.tasks().len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(app.tasks().is_empty());
        assert_eq!(&app.state, &AppState::Browse);
    }

    #[test]
    fn test_remove_with_y() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "a");
        add(&mut app, "b");
        press(&mut app, KeyCode::Char('d'));
        let screen = render_to_string(&mut app, 80, 24);
        assert!(screen.contains("Remove item"));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks().tasks()[0].title, "a");
    }

    #[test]
    fn test_simple_variant_removes_immediately() {
        let mut app = App::new(Variant::Simple);
        add(&mut app, "a");
        add(&mut app, "a");
        assert_eq!(app.tasks().len(), 2);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(&app.state, &AppState::Browse);
        assert_eq!(app.tasks().len(), 1);
    }

    #[test]
    fn test_simple_variant_blocks_edit() {
        let mut app = App::new(Variant::Simple);
        add(&mut app, "a");
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(&app.state, &AppState::Browse);
        assert!(app.status_message.contains("simple variant"));
    }

    #[test]
    fn test_edit_title() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "Buy milk");
        press(&mut app, KeyCode::Char(' '));
        let id = app.tasks().tasks()[0].id;

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(&app.state, &AppState::Edit(id));
        type_str(&mut app, " and eggs");
        press(&mut app, KeyCode::Enter);

        let task = &app.tasks().tasks()[0];
        assert_eq!(task.title, "Buy milk and eggs");
        assert_eq!(task.id, id);
        assert!(task.done);
    }

    #[test]
    fn test_edit_cancel_keeps_title() {
        let mut app = App::new(Variant::Full);
        add(&mut app, "Buy milk");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.tasks().tasks()[0].title, "Buy milk");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(Variant::Full);
        assert!(press(&mut app, KeyCode::Char('q')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(ctrl_c).unwrap());
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = App::new(Variant::Full);
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!app.handle_key(release).unwrap());
    }

    #[test]
    fn test_counter_rendered() {
        let mut app = App::new(Variant::Full);
        assert!(render_to_string(&mut app, 80, 24).contains("You have 0 tasks"));
        add(&mut app, "a");
        add(&mut app, "b");
        press(&mut app, KeyCode::Char('x'));
        let screen = render_to_string(&mut app, 80, 24);
        assert!(screen.contains("You have 2 tasks (1 done)"));
        assert!(screen.contains("[x]"));
    }
}
