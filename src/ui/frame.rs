use std::collections::VecDeque;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::{Color, Style};
use crate::state::AppState;

const CONSOLE_LINES: u16 = 3;
const CONSOLE_CAPACITY: usize = 100;

/// Frame wrapping the active pane with border, header bar, and message console
pub struct Frame {
    messages: VecDeque<String>,
    title: String,
}

impl Frame {
    pub fn new(title: &str) -> Self {
        Self {
            messages: VecDeque::with_capacity(CONSOLE_CAPACITY),
            title: title.to_string(),
        }
    }

    /// Push a message to the console ring buffer
    pub fn push_message(&mut self, msg: String) {
        if self.messages.len() >= CONSOLE_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(msg);
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Draw the chrome and return the area left for the active pane
    pub fn render(&self, area: Rect, buf: &mut Buffer, state: &AppState) -> Rect {
        if area.width < 20 || area.height < CONSOLE_LINES + 4 {
            return area;
        }

        let border_style = ratatui::style::Style::from(Style::new().fg(Color::GRAY));
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .render(area, buf);

        // Title on the left of the top border, host model summary on the right
        let header = format!(" {} ", self.title);
        let header_style = ratatui::style::Style::from(Style::new().fg(Color::CYAN).bold());
        let header_width = area.width.saturating_sub(2);
        let (header_end, _) =
            buf.set_stringn(area.x + 1, area.y, &header, header_width as usize, header_style);

        let summary = format!(
            " host: {}/{} values, {} ({} updates) ",
            state.model.param_values.len(),
            state.params.len(),
            state.model.first_color().unwrap_or("-"),
            state.updates,
        );
        let summary_len = summary.chars().count() as u16;
        let summary_x = (area.x + area.width).saturating_sub(summary_len + 1);
        if summary_x > header_end {
            buf.set_string(
                summary_x,
                area.y,
                &summary,
                Style::new().fg(Color::DARK_GRAY),
            );
        }

        // Console separator line
        let sep_y = area.y + area.height - CONSOLE_LINES - 2;
        buf.set_string(area.x, sep_y, "├", border_style);
        for x in (area.x + 1)..(area.x + area.width - 1) {
            buf.set_string(x, sep_y, "─", border_style);
        }
        buf.set_string(area.x + area.width - 1, sep_y, "┤", border_style);

        let prompt_style = ratatui::style::Style::from(Style::new().fg(Color::DARK_GRAY));
        let msg_style = ratatui::style::Style::from(Style::new().fg(Color::SKY_BLUE));
        let skip = self.messages.len().saturating_sub(CONSOLE_LINES as usize);
        for (i, msg) in self.messages().skip(skip).enumerate() {
            let y = sep_y + 1 + i as u16;
            let line = Line::from(vec![
                Span::styled("> ", prompt_style),
                Span::styled(msg, msg_style),
            ]);
            Paragraph::new(line).render(Rect::new(area.x + 2, y, area.width - 4, 1), buf);
        }

        Rect::new(
            area.x + 1,
            area.y + 1,
            area.width - 2,
            sep_y - area.y - 1,
        )
    }
}
