use ratatui::buffer::Buffer;
use unicode_width::UnicodeWidthChar;

use crate::ui::{Color, InputEvent, KeyCode, Style};

/// What a key press did to a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not a key the input handles
    Ignored,
    /// Cursor moved, text unchanged
    Moved,
    /// Text changed
    Changed,
}

/// A single-line text input widget
pub struct TextInput {
    value: String,
    /// Cursor position in chars, not bytes
    cursor: usize,
    /// Placeholder text shown when empty
    placeholder: String,
    focused: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: String::new(),
            focused: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.char_len();
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> InputOutcome {
        if !self.focused {
            return InputOutcome::Ignored;
        }

        match event.key {
            KeyCode::Char(ch) if !event.modifiers.ctrl && !event.modifiers.alt => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, ch);
                self.cursor += 1;
                InputOutcome::Changed
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return InputOutcome::Moved;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                InputOutcome::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return InputOutcome::Moved;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                InputOutcome::Changed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputOutcome::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                InputOutcome::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputOutcome::Moved
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                InputOutcome::Moved
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Render as `[text]` at the given position, scrolled to keep the cursor visible
    pub fn render(&self, buf: &mut Buffer, x: u16, y: u16, width: u16) {
        if width < 3 {
            return;
        }
        let frame_style = if self.focused {
            Style::new().fg(Color::SKY_BLUE)
        } else {
            Style::new().fg(Color::GRAY)
        };
        buf.set_string(x, y, "[", frame_style);
        buf.set_string(x + width - 1, y, "]", frame_style);

        let content_x = x + 1;
        let content_width = (width - 2) as usize;

        if self.value.is_empty() && !self.focused {
            let placeholder: String = self.placeholder.chars().take(content_width).collect();
            buf.set_string(content_x, y, placeholder, Style::new().fg(Color::DARK_GRAY));
            return;
        }

        // Scroll by whole chars until the text before the cursor and the
        // cursor cell itself fit in display columns
        let widths: Vec<usize> = self.value.chars().map(char_width).collect();
        let cursor_width = widths.get(self.cursor).copied().unwrap_or(1).max(1);
        let mut scroll = 0;
        while scroll < self.cursor
            && widths[scroll..self.cursor].iter().sum::<usize>() + cursor_width > content_width
        {
            scroll += 1;
        }

        let mut offset = 0;
        for (ch, width) in self.value.chars().zip(&widths).skip(scroll) {
            if offset + width > content_width {
                break;
            }
            buf.set_string(content_x + offset as u16, y, ch.to_string(), Style::new().fg(Color::WHITE));
            offset += width;
        }

        if self.focused {
            let before: usize = widths[scroll..self.cursor].iter().sum();
            if before + cursor_width <= content_width {
                let cursor_char = self.value.chars().nth(self.cursor).unwrap_or(' ');
                buf.set_string(
                    content_x + before as u16,
                    y,
                    cursor_char.to_string(),
                    Style::new().fg(Color::WHITE).bg(Color::SELECTION_BG),
                );
            }
        }
    }
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}
