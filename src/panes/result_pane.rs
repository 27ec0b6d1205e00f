use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Widget};

use crate::state::AppState;
use crate::ui::layout::centered;
use crate::ui::{Action, Color, InputEvent, KeyCode, Keymap, NavAction, Pane, Style};

/// Shows the JSON of the last model pulled from the editor
pub struct ResultPane {
    keymap: Keymap,
    title: String,
    scroll: usize,
}

impl ResultPane {
    pub fn new(title: &str) -> Self {
        Self {
            keymap: Keymap::new()
                .bind_key(KeyCode::Escape, "close", "Back to editor")
                .bind_key(KeyCode::Enter, "close", "Back to editor")
                .bind_key(KeyCode::Up, "up", "Scroll up")
                .bind_key(KeyCode::Down, "down", "Scroll down")
                .bind_key(KeyCode::F(1), "help", "Show key bindings"),
            title: title.to_string(),
            scroll: 0,
        }
    }
}

impl Pane for ResultPane {
    fn id(&self) -> &'static str {
        "result"
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action {
        match self.keymap.lookup(&event) {
            Some("close") => Action::Nav(NavAction::PopPane),
            Some("help") => Action::Nav(NavAction::ShowHelp),
            Some("up") => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            Some("down") => {
                let lines = state.last_result.as_deref().map_or(0, |r| r.lines().count());
                if self.scroll + 1 < lines {
                    self.scroll += 1;
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, state: &AppState) {
        let rect = centered(area, 60, area.height.saturating_sub(2));
        let title = format!(" {} ", self.title);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::new().fg(Color::SKY_BLUE))
            .title_style(Style::new().fg(Color::SKY_BLUE).bold());
        let inner = block.inner(rect);
        block.render(rect, buf);

        let Some(json) = state.last_result.as_deref() else {
            buf.set_string(inner.x + 1, inner.y, "(no model yet)", Style::new().fg(Color::DARK_GRAY));
            return;
        };

        let visible = inner.height.saturating_sub(1) as usize;
        for (i, line) in json.lines().skip(self.scroll).take(visible).enumerate() {
            buf.set_stringn(
                inner.x + 1,
                inner.y + i as u16,
                line,
                inner.width.saturating_sub(1) as usize,
                Style::new().fg(Color::WHITE),
            );
        }

        buf.set_stringn(
            inner.x + 1,
            inner.y + inner.height.saturating_sub(1),
            "[Esc/Enter] Back  [Up/Down] Scroll",
            inner.width.saturating_sub(1) as usize,
            Style::new().fg(Color::DARK_GRAY),
        );
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn on_enter(&mut self, _state: &AppState) {
        self.scroll = 0;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
