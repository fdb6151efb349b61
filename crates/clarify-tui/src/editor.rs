//! Answer entry widget

use crate::text::hard_wrap;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const CURSOR: char = '▌';

/// What a key did to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Enter was pressed; carries the buffer as it was
    Submitted(String),
    /// The buffer or cursor changed
    Edited,
    /// The key means nothing to the editor
    Ignored,
}

/// The capability the collector needs from an answer widget
pub trait AnswerEditor {
    /// Feed one key
    fn handle_key(&mut self, key: KeyEvent) -> EditorEvent;

    /// Current buffer
    fn text(&self) -> &str;

    /// Replace the buffer and move the cursor to its end
    fn set_text(&mut self, text: &str);

    /// Lines to paint at `width` columns
    fn render(&self, width: usize) -> Vec<String>;
}

/// Single-line editor with a movable cursor and readline-style shortcuts
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
    /// Byte offset, always on a char boundary
    cursor: usize,
    theme: Theme,
}

impl LineEditor {
    /// Create an empty editor
    pub fn new(theme: Theme) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            theme,
        }
    }

    /// Cursor position, in characters
    pub fn cursor(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    fn delete_word_before_cursor(&mut self) {
        let before = &self.buffer[..self.cursor];
        let trimmed = before.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }
}

impl AnswerEditor for LineEditor {
    fn handle_key(&mut self, key: KeyEvent) -> EditorEvent {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let at_start = self.cursor == 0;
        let at_end = self.cursor == self.buffer.len();

        match key.code {
            KeyCode::Enter => return EditorEvent::Submitted(self.buffer.clone()),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.buffer.len(),
            KeyCode::Char('u') if ctrl => {
                self.buffer.replace_range(..self.cursor, "");
                self.cursor = 0;
            }
            KeyCode::Char('k') if ctrl => self.buffer.truncate(self.cursor),
            KeyCode::Char('w') if ctrl => self.delete_word_before_cursor(),
            KeyCode::Char(ch) if !ctrl && !alt => {
                self.buffer.insert(self.cursor, ch);
                self.cursor += ch.len_utf8();
            }
            KeyCode::Backspace if !at_start => {
                let prev = self.prev_boundary();
                self.buffer.replace_range(prev..self.cursor, "");
                self.cursor = prev;
            }
            KeyCode::Delete if !at_end => {
                let next = self.next_boundary();
                self.buffer.replace_range(self.cursor..next, "");
            }
            KeyCode::Left if !at_start => self.cursor = self.prev_boundary(),
            KeyCode::Right if !at_end => self.cursor = self.next_boundary(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buffer.len(),
            _ => return EditorEvent::Ignored,
        }
        EditorEvent::Edited
    }

    fn text(&self) -> &str {
        &self.buffer
    }

    fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    fn render(&self, width: usize) -> Vec<String> {
        let width = width.max(1);
        let mut shown = String::with_capacity(self.buffer.len() + CURSOR.len_utf8());
        shown.push_str(&self.buffer[..self.cursor]);
        shown.push(CURSOR);
        shown.push_str(&self.buffer[self.cursor..]);

        let rule = self.theme.accent(&"─".repeat(width));
        let mut lines = vec![rule.clone()];
        lines.extend(hard_wrap(&shown, width));
        lines.push(rule);
        lines
    }
}
