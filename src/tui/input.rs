//! Text entry for new task titles and title edits.

use crossterm::event::KeyCode;
use ratatui::text::Span;

/// A single-line text input. The only state it keeps is the text being composed.
///
/// The cursor counts characters, not bytes, so titles with accents or emoji
/// edit correctly.
#[derive(Clone, Default)]
pub struct TodoInput {
    pub value: String,
    pub cursor: usize,
}

impl TodoInput {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let idx = self.byte_index(self.cursor - 1);
            self.value.remove(idx);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Apply an editing key. Returns false for keys the field does not handle.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => self.handle_char(c),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => return false,
        }
        true
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Display column of the cursor. Wide glyphs take two cells.
    pub fn cursor_column(&self) -> u16 {
        let before: String = self.value.chars().take(self.cursor).collect();
        Span::raw(before).width() as u16
    }

    /// Horizontal scroll and on-screen cursor column for a field `width` cells wide.
    ///
    /// Scrolls just far enough to keep the cursor inside the field.
    pub fn viewport(&self, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let column = self.cursor_column();
        let scroll = column.saturating_sub(width - 1);
        (scroll, column - scroll)
    }

    /// Hand over the trimmed title and clear the field.
    ///
    /// Blank input is discarded and yields `None`.
    pub fn submit(&mut self) -> Option<String> {
        let title = self.value.trim().to_string();
        self.clear();
        if title.is_empty() { None } else { Some(title) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TodoInput {
        let mut input = TodoInput::new();
        for c in s.chars() {
            input.handle_char(c);
        }
        input
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let mut input = typed("  Buy milk  ");
        assert_eq!(input.submit().as_deref(), Some("Buy milk"));
        assert!(input.value.is_empty());
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_blank_submit_yields_nothing() {
        let mut input = typed("   ");
        assert_eq!(input.submit(), None);
        assert!(input.value.is_empty());
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = typed("café");
        input.handle_backspace();
        assert_eq!(input.value, "caf");
        input.handle_char('é');
        input.move_cursor_left();
        input.handle_char('x');
        assert_eq!(input.value, "cafxé");
        input.handle_delete();
        assert_eq!(input.value, "cafx");
    }

    #[test]
    fn test_cursor_column_counts_wide_glyphs() {
        let input = typed("日本a");
        assert_eq!(input.cursor_column(), 5);
        let mut input = TodoInput::with_value("日本");
        input.move_cursor_left();
        assert_eq!(input.cursor_column(), 2);
    }

    #[test]
    fn test_viewport_scrolls_to_cursor() {
        let input = typed("abcdefghij");
        assert_eq!(input.viewport(20), (0, 10));
        assert_eq!(input.viewport(5), (6, 4));
        assert_eq!(input.viewport(0), (0, 0));

        let input = typed("日本語");
        assert_eq!(input.viewport(4), (3, 3));
    }

    #[test]
    fn test_home_end_and_unhandled_keys() {
        let mut input = TodoInput::with_value("abc");
        assert_eq!(input.cursor, 3);
        assert!(input.handle_key(KeyCode::Home));
        assert!(input.handle_key(KeyCode::Char('>')));
        assert_eq!(input.value, ">abc");
        assert!(input.handle_key(KeyCode::End));
        assert_eq!(input.cursor, 4);
        assert!(!input.handle_key(KeyCode::Enter));
        assert!(!input.handle_key(KeyCode::Esc));
    }
}
