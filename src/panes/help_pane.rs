use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::state::AppState;
use crate::ui::layout::centered;
use crate::ui::{Action, Color, InputEvent, KeyCode, Keymap, NavAction, Pane, Style};

pub struct HelpPane {
    keymap: Keymap,
    /// (key, description) rows of the pane the help was opened from
    display_keymap: Vec<(String, String)>,
    title: String,
    scroll: usize,
}

impl HelpPane {
    pub fn new() -> Self {
        Self {
            keymap: Keymap::new()
                .bind_key(KeyCode::Escape, "close", "Close help")
                .bind_key(KeyCode::F(1), "close", "Close help")
                .bind_key(KeyCode::Up, "up", "Scroll up")
                .bind_key(KeyCode::Down, "down", "Scroll down"),
            display_keymap: Vec::new(),
            title: String::new(),
            scroll: 0,
        }
    }

    /// Set the keymap to display
    pub fn set_context(&mut self, pane_title: &str, keymap: &Keymap) {
        self.title = pane_title.to_string();
        self.scroll = 0;
        self.display_keymap = keymap
            .bindings()
            .iter()
            .map(|b| (b.pattern.display(), b.description.to_string()))
            .collect();
    }
}

impl Default for HelpPane {
    fn default() -> Self {
        Self::new()
    }
}

impl Pane for HelpPane {
    fn id(&self) -> &'static str {
        "help"
    }

    fn title(&self) -> &str {
        "Help"
    }

    fn handle_input(&mut self, event: InputEvent, _state: &AppState) -> Action {
        match self.keymap.lookup(&event) {
            Some("close") => Action::Nav(NavAction::PopPane),
            Some("up") => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            Some("down") => {
                if self.scroll + 1 < self.display_keymap.len() {
                    self.scroll += 1;
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, _state: &AppState) {
        let rect = centered(area, 50, 14);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help: {} ", self.title))
            .border_style(Style::new().fg(Color::SKY_BLUE))
            .title_style(Style::new().fg(Color::SKY_BLUE));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let key_style = ratatui::style::Style::from(Style::new().fg(Color::CYAN).bold());
        let desc_style = ratatui::style::Style::from(Style::new().fg(Color::WHITE));
        let visible = inner.height.saturating_sub(2) as usize;

        for (i, (key, desc)) in self.display_keymap.iter().skip(self.scroll).take(visible).enumerate() {
            let line = Line::from(vec![
                Span::styled(format!("{:<10}", key), key_style),
                Span::styled(desc.as_str(), desc_style),
            ]);
            let line_area = Rect::new(inner.x + 1, inner.y + i as u16, inner.width.saturating_sub(1), 1);
            Paragraph::new(line).render(line_area, buf);
        }

        buf.set_stringn(
            inner.x + 1,
            inner.y + inner.height.saturating_sub(1),
            "[Esc/F1] Close  [Up/Down] Scroll",
            inner.width.saturating_sub(1) as usize,
            Style::new().fg(Color::DARK_GRAY),
        );
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
