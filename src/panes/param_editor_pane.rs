use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tracing::{debug, warn};

use crate::state::{AppState, ParamEditor};
use crate::ui::widgets::{ColorInput, ColorOutcome, InputOutcome, TextInput};
use crate::ui::{Action, Color, InputEvent, KeyCode, Keymap, ModelAction, NavAction, Pane, Style};

const MAX_INPUT_WIDTH: u16 = 40;

/// One labeled text row per parameter followed by the color row
pub struct ParamEditorPane {
    keymap: Keymap,
    editor: ParamEditor,
    fields: Vec<TextInput>,
    color: ColorInput,
    color_label: String,
    /// Index into fields; `fields.len()` is the color row
    focus: usize,
}

impl ParamEditorPane {
    pub fn new(editor: ParamEditor, color_label: &str, palette: Vec<String>) -> Self {
        let fields: Vec<TextInput> = editor
            .params()
            .iter()
            .map(|p| TextInput::new().with_value(editor.value(p.id)))
            .collect();

        let mut pane = Self {
            keymap: Keymap::new()
                .bind_key(KeyCode::Down, "next", "Next field")
                .bind_key(KeyCode::Tab, "next", "Next field")
                .bind_key(KeyCode::Up, "prev", "Previous field")
                .bind_key(KeyCode::BackTab, "prev", "Previous field")
                .bind_ctrl('g', "get_model", "Get model")
                .bind_key(KeyCode::F(5), "get_model", "Get model")
                .bind_key(KeyCode::F(1), "help", "Show key bindings")
                .bind_key(KeyCode::Escape, "quit", "Quit"),
            editor,
            fields,
            color: ColorInput::new(palette),
            color_label: color_label.to_string(),
            focus: 0,
        };
        pane.sync_focus();
        pane
    }

    pub fn editor(&self) -> &ParamEditor {
        &self.editor
    }

    #[allow(dead_code)]
    pub fn focus(&self) -> usize {
        self.focus
    }

    fn color_row(&self) -> usize {
        self.fields.len()
    }

    fn sync_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focused(i == self.focus);
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let rows = self.fields.len() + 1;
        self.focus = if forward {
            (self.focus + 1) % rows
        } else {
            (self.focus + rows - 1) % rows
        };
        self.sync_focus();
    }

    fn handle_field_input(&mut self, event: &InputEvent) -> Action {
        let index = self.focus;
        let Some(field) = self.fields.get_mut(index) else {
            return Action::None;
        };
        if field.handle_input(event) == InputOutcome::Changed {
            let value = field.value().to_string();
            let param_id = self.editor.params()[index].id;
            self.editor.on_field_change(param_id, &value);
        }
        Action::None
    }

    fn handle_color_input(&mut self, event: &InputEvent) -> Action {
        let current = self.editor.color().to_string();
        match self.color.handle_input(event, &current) {
            ColorOutcome::Picked(color) => {
                debug!(color = color.as_str(), "color picked");
                self.editor.on_color_change(&color);
                Action::None
            }
            ColorOutcome::Rejected(typed) => {
                warn!(value = typed.as_str(), "rejected color input");
                Action::Notify(format!("not a #rrggbb color: {}", typed))
            }
            ColorOutcome::Consumed => Action::None,
            ColorOutcome::Ignored => match event.key {
                KeyCode::Char('?') => Action::Nav(NavAction::ShowHelp),
                _ => Action::None,
            },
        }
    }

    fn label_width(&self) -> u16 {
        let longest = self
            .editor
            .params()
            .iter()
            .map(|p| p.name.chars().count())
            .chain(std::iter::once(self.color_label.chars().count()))
            .max()
            .unwrap_or(0);
        longest as u16 + 2
    }
}

impl Pane for ParamEditorPane {
    fn id(&self) -> &'static str {
        "editor"
    }

    fn title(&self) -> &str {
        "Parameters"
    }

    fn handle_input(&mut self, event: InputEvent, _state: &AppState) -> Action {
        if self.color.is_editing() {
            return self.handle_color_input(&event);
        }

        match self.keymap.lookup(&event) {
            Some("next") => {
                self.move_focus(true);
                Action::None
            }
            Some("prev") => {
                self.move_focus(false);
                Action::None
            }
            Some("get_model") => Action::Model(ModelAction::Pull),
            Some("help") => Action::Nav(NavAction::ShowHelp),
            Some("quit") => Action::Quit,
            _ if self.focus == self.color_row() => self.handle_color_input(&event),
            _ => self.handle_field_input(&event),
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, _state: &AppState) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let label_x = area.x + 2;
        let input_x = label_x + 2 + self.label_width();
        let input_width = (area.x + area.width)
            .saturating_sub(input_x + 1)
            .min(MAX_INPUT_WIDTH);
        let bottom = area.y + area.height;

        let draw_label = |buf: &mut Buffer, y: u16, label: &str, focused: bool| {
            if focused {
                buf.set_string(label_x, y, ">", Style::new().fg(Color::ORANGE).bold());
                buf.set_string(label_x + 2, y, label, Style::new().fg(Color::CYAN).bold());
            } else {
                buf.set_string(label_x + 2, y, label, Style::new().fg(Color::CYAN));
            }
        };

        let mut y = area.y + 1;
        for (i, (param, field)) in self.editor.params().iter().zip(&self.fields).enumerate() {
            if y >= bottom {
                return;
            }
            draw_label(buf, y, &param.name, i == self.focus);
            field.render(buf, input_x, y, input_width);
            y += 1;
        }

        y += 1;
        if y >= bottom {
            return;
        }
        let color_focused = self.focus == self.color_row();
        draw_label(buf, y, &self.color_label, color_focused);
        self.color.render(buf, input_x, y, input_width, self.editor.color(), color_focused);

        let help_y = bottom - 1;
        if help_y > y + 1 {
            let help_text = if self.color.is_editing() {
                "Enter: apply | Esc: cancel"
            } else if color_focused {
                "Left/Right: preset | Enter: type hex | Ctrl+G: get model | F1: help"
            } else {
                "Up/Down: field | Ctrl+G: get model | F1: help | Esc: quit"
            };
            buf.set_stringn(
                label_x,
                help_y,
                help_text,
                area.width.saturating_sub(4) as usize,
                Style::new().fg(Color::DARK_GRAY),
            );
        }
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::state::model::ParamValue;
    use crate::state::param::Param;
    use crate::state::{FormDefinition, Model};
    use crate::ui::Modifiers;

    fn pane_with_sink() -> (ParamEditorPane, Rc<RefCell<Vec<Model>>>) {
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&emitted);
        let editor = ParamEditor::new(
            vec![Param::new(1, "Purpose"), Param::new(2, "Length")],
            Model {
                param_values: vec![ParamValue::new(1, "casual")],
                colors: vec![],
            },
            move |model| sink.borrow_mut().push(model),
        );
        let palette = vec!["#000000".to_string(), "#ff0000".to_string()];
        (ParamEditorPane::new(editor, "Color", palette), emitted)
    }

    fn state() -> AppState {
        AppState::new(&FormDefinition::embedded())
    }

    fn press(pane: &mut ParamEditorPane, key: KeyCode) -> Action {
        pane.handle_input(InputEvent::key(key), &state())
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_typing_emits_once_per_keystroke() {
        let (mut pane, emitted) = pane_with_sink();
        press(&mut pane, KeyCode::Down);
        press(&mut pane, KeyCode::Char('m'));
        press(&mut pane, KeyCode::Char('a'));
        // Cursor movement alone emits nothing
        press(&mut pane, KeyCode::Left);

        let emitted = emitted.borrow();
        assert_eq!(emitted.len(), 2);
        assert_eq!(
            emitted[1].param_values,
            vec![ParamValue::new(1, "casual"), ParamValue::new(2, "ma")]
        );
        assert_eq!(emitted.last(), Some(&pane.editor().model()));
    }

    #[test]
    fn test_editing_existing_value_appends_at_end() {
        let (mut pane, _) = pane_with_sink();
        press(&mut pane, KeyCode::Backspace);
        assert_eq!(pane.editor().value(1), "casua");
    }

    #[test]
    fn test_focus_wraps_through_color_row() {
        let (mut pane, _) = pane_with_sink();
        press(&mut pane, KeyCode::Up);
        assert_eq!(pane.focus(), 2);
        press(&mut pane, KeyCode::Tab);
        assert_eq!(pane.focus(), 0);
    }

    #[test]
    fn test_color_preset_cycle_emits_new_color() {
        let (mut pane, emitted) = pane_with_sink();
        press(&mut pane, KeyCode::BackTab);
        press(&mut pane, KeyCode::Right);
        assert_eq!(pane.editor().color(), "#ff0000");
        assert_eq!(emitted.borrow().len(), 1);
        assert_eq!(emitted.borrow()[0].colors, vec!["#ff0000".to_string()]);
    }

    #[test]
    fn test_rejected_hex_notifies_without_emitting() {
        let (mut pane, emitted) = pane_with_sink();
        press(&mut pane, KeyCode::BackTab);
        press(&mut pane, KeyCode::Enter);
        press(&mut pane, KeyCode::Char('x'));
        let action = press(&mut pane, KeyCode::Enter);
        assert!(matches!(action, Action::Notify(_)));
        assert!(emitted.borrow().is_empty());
        assert_eq!(pane.editor().color(), "#000000");
    }

    #[test]
    fn test_get_model_and_help_and_quit() {
        let (mut pane, _) = pane_with_sink();
        let ctrl_g = InputEvent::new(KeyCode::Char('g'), Modifiers::ctrl());
        assert_eq!(pane.handle_input(ctrl_g, &state()), Action::Model(ModelAction::Pull));
        assert_eq!(press(&mut pane, KeyCode::F(1)), Action::Nav(NavAction::ShowHelp));
        assert_eq!(press(&mut pane, KeyCode::Escape), Action::Quit);
    }

    #[test]
    fn test_question_mark_is_text_in_fields() {
        let (mut pane, _) = pane_with_sink();
        assert_eq!(press(&mut pane, KeyCode::Char('?')), Action::None);
        assert_eq!(pane.editor().value(1), "casual?");
    }

    #[test]
    fn test_render_labels_values_and_color() {
        let (pane, _) = pane_with_sink();
        let area = Rect::new(0, 0, 70, 10);
        let mut buf = Buffer::empty(area);
        pane.render(area, &mut buf, &state());

        assert!(row(&buf, 1).contains("> Purpose"));
        assert!(row(&buf, 1).contains("[casual"));
        assert!(row(&buf, 2).contains("Length"));
        assert!(row(&buf, 2).contains("[ "));
        assert!(row(&buf, 4).contains("Color"));
        assert!(row(&buf, 4).contains("#000000"));
    }
}
