use ratatui::buffer::Buffer;

use super::text_input::TextInput;
use super::is_hex_color;
use crate::ui::{Color, InputEvent, KeyCode, Style};

/// Result of a key press on the color input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorOutcome {
    Ignored,
    /// Handled without picking a color
    Consumed,
    Picked(String),
    /// Typed value is not `#rrggbb`
    Rejected(String),
}

/// Color picker: cycles through preset colors or takes a typed hex value
pub struct ColorInput {
    palette: Vec<String>,
    hex: TextInput,
    editing: bool,
}

impl ColorInput {
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            hex: TextInput::new().with_placeholder("#rrggbb"),
            editing: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    fn step(&self, current: &str, forward: bool) -> Option<String> {
        if self.palette.is_empty() {
            return None;
        }
        let len = self.palette.len();
        let position = self
            .palette
            .iter()
            .position(|c| c.eq_ignore_ascii_case(current));
        let next = match (position, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        Some(self.palette[next].clone())
    }

    /// Handle a key while the color row has focus; `current` is the editor's color
    pub fn handle_input(&mut self, event: &InputEvent, current: &str) -> ColorOutcome {
        if self.editing {
            return match event.key {
                KeyCode::Enter => {
                    let typed = self.hex.value().trim().to_string();
                    self.stop_editing();
                    if is_hex_color(&typed) {
                        ColorOutcome::Picked(typed.to_lowercase())
                    } else {
                        ColorOutcome::Rejected(typed)
                    }
                }
                KeyCode::Escape => {
                    self.stop_editing();
                    ColorOutcome::Consumed
                }
                _ => {
                    self.hex.handle_input(event);
                    ColorOutcome::Consumed
                }
            };
        }

        match event.key {
            KeyCode::Right => self
                .step(current, true)
                .map_or(ColorOutcome::Consumed, ColorOutcome::Picked),
            KeyCode::Left => self
                .step(current, false)
                .map_or(ColorOutcome::Consumed, ColorOutcome::Picked),
            KeyCode::Enter => {
                self.hex.set_value(current);
                self.hex.set_focused(true);
                self.editing = true;
                ColorOutcome::Consumed
            }
            _ => ColorOutcome::Ignored,
        }
    }

    fn stop_editing(&mut self) {
        self.editing = false;
        self.hex.set_focused(false);
    }

    /// Render the swatch and value at the given position
    pub fn render(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, current: &str, focused: bool) {
        let swatch = Color::from_hex(current).unwrap_or(Color::BLACK);
        buf.set_string(x, y, "    ", Style::new().bg(swatch));

        let value_x = x + 5;
        let value_width = width.saturating_sub(5);
        if self.editing {
            self.hex.render(buf, value_x, y, value_width.min(12));
            return;
        }

        let text_style = if focused {
            Style::new().fg(Color::WHITE).bg(Color::SELECTION_BG)
        } else {
            Style::new().fg(Color::WHITE)
        };
        let text = format!("{}  < >", current);
        buf.set_stringn(value_x, y, text, value_width as usize, text_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<String> {
        vec!["#000000".to_string(), "#ffffff".to_string(), "#ff0000".to_string()]
    }

    fn press(input: &mut ColorInput, key: KeyCode, current: &str) -> ColorOutcome {
        input.handle_input(&InputEvent::key(key), current)
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut input = ColorInput::new(palette());
        assert_eq!(
            press(&mut input, KeyCode::Right, "#ff0000"),
            ColorOutcome::Picked("#000000".to_string())
        );
        assert_eq!(
            press(&mut input, KeyCode::Left, "#000000"),
            ColorOutcome::Picked("#ff0000".to_string())
        );
        assert_eq!(
            press(&mut input, KeyCode::Right, "#FFFFFF"),
            ColorOutcome::Picked("#ff0000".to_string())
        );
    }

    #[test]
    fn test_cycle_from_color_outside_palette() {
        let mut input = ColorInput::new(palette());
        assert_eq!(
            press(&mut input, KeyCode::Right, "#123456"),
            ColorOutcome::Picked("#000000".to_string())
        );
        assert_eq!(
            press(&mut input, KeyCode::Left, "#123456"),
            ColorOutcome::Picked("#ff0000".to_string())
        );
    }

    #[test]
    fn test_empty_palette_picks_nothing() {
        let mut input = ColorInput::new(Vec::new());
        assert_eq!(press(&mut input, KeyCode::Right, "#000000"), ColorOutcome::Consumed);
    }

    #[test]
    fn test_typed_hex_is_picked_lowercased() {
        let mut input = ColorInput::new(palette());
        assert_eq!(press(&mut input, KeyCode::Enter, "#000000"), ColorOutcome::Consumed);
        assert!(input.is_editing());
        for _ in 0..6 {
            press(&mut input, KeyCode::Backspace, "#000000");
        }
        for ch in "ABCDEF".chars() {
            press(&mut input, KeyCode::Char(ch), "#000000");
        }
        assert_eq!(
            press(&mut input, KeyCode::Enter, "#000000"),
            ColorOutcome::Picked("#abcdef".to_string())
        );
        assert!(!input.is_editing());
    }

    #[test]
    fn test_malformed_hex_is_rejected() {
        let mut input = ColorInput::new(palette());
        press(&mut input, KeyCode::Enter, "#000000");
        press(&mut input, KeyCode::Char('z'), "#000000");
        assert_eq!(
            press(&mut input, KeyCode::Enter, "#000000"),
            ColorOutcome::Rejected("#000000z".to_string())
        );
    }

    #[test]
    fn test_escape_cancels_typing() {
        let mut input = ColorInput::new(palette());
        press(&mut input, KeyCode::Enter, "#000000");
        press(&mut input, KeyCode::Char('1'), "#000000");
        assert_eq!(press(&mut input, KeyCode::Escape, "#000000"), ColorOutcome::Consumed);
        assert!(!input.is_editing());
    }
}
