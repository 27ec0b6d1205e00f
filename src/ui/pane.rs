use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::{InputEvent, Keymap};
use crate::state::AppState;

/// Navigation requests; `PopPane` is applied by the pane manager
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    PopPane,
    /// Open the help overlay for the active pane
    ShowHelp,
}

/// Requests concerning the model
#[derive(Debug, Clone, PartialEq)]
pub enum ModelAction {
    /// Pull the current model from the editor and show it as JSON
    Pull,
}

/// Actions that can be returned from pane input handling
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,
    Nav(NavAction),
    Model(ModelAction),
    /// Show a line in the message console
    Notify(String),
}

/// Trait for UI panes (screens/views)
pub trait Pane {
    fn id(&self) -> &'static str;

    /// Title used by the help overlay
    fn title(&self) -> &str;

    fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &AppState);

    /// Get the keymap for this pane (for introspection/help)
    fn keymap(&self) -> &Keymap;

    /// Called when this pane becomes active
    fn on_enter(&mut self, _state: &AppState) {}

    /// Return self as Any for downcasting (required for type-specific access)
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Owns every pane; one is active, pushed panes remember where to return.
pub struct PaneManager {
    panes: Vec<Box<dyn Pane>>,
    active_index: usize,
    stack: Vec<usize>,
}

impl PaneManager {
    pub fn new(initial_pane: Box<dyn Pane>) -> Self {
        Self {
            panes: vec![initial_pane],
            active_index: 0,
            stack: Vec::new(),
        }
    }

    /// Add a pane to the manager (does not make it active)
    pub fn add_pane(&mut self, pane: Box<dyn Pane>) {
        self.panes.push(pane);
    }

    pub fn active(&self) -> &dyn Pane {
        self.panes[self.active_index].as_ref()
    }

    pub fn active_mut(&mut self) -> &mut dyn Pane {
        self.panes[self.active_index].as_mut()
    }

    /// Show a pane on top of the current one
    pub fn push_to(&mut self, id: &str, state: &AppState) -> bool {
        match self.index_of(id) {
            Some(index) if index != self.active_index => {
                self.stack.push(self.active_index);
                self.activate(index, state);
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Return to the pane below the current one, if any
    pub fn pop(&mut self, state: &AppState) -> bool {
        match self.stack.pop() {
            Some(index) => {
                self.activate(index, state);
                true
            }
            None => false,
        }
    }

    /// Handle input for the active pane, applying plain navigation itself
    pub fn handle_input(&mut self, event: InputEvent, state: &AppState) -> Action {
        let action = self.active_mut().handle_input(event, state);

        if action == Action::Nav(NavAction::PopPane) {
            self.pop(state);
        }

        action
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, state: &AppState) {
        self.active().render(area, buf, state);
    }

    /// Get a mutable reference to a pane by ID, downcasted to a specific type
    pub fn get_pane_mut<T: 'static>(&mut self, id: &str) -> Option<&mut T> {
        self.panes
            .iter_mut()
            .find(|p| p.id() == id)
            .and_then(|p| p.as_any_mut().downcast_mut::<T>())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.panes.iter().position(|p| p.id() == id)
    }

    fn activate(&mut self, index: usize, state: &AppState) {
        self.active_index = index;
        self.panes[index].on_enter(state);
    }
}
