pub mod frame;
pub mod input;
pub mod keymap;
pub mod layout;
pub mod pane;
pub mod ratatui_impl;
pub mod style;
pub mod widgets;

pub use frame::Frame;
pub use input::{InputEvent, InputSource, KeyCode, Modifiers};
pub use keymap::Keymap;
pub use pane::{Action, ModelAction, NavAction, Pane, PaneManager};
pub use ratatui_impl::RatatuiBackend;
pub use style::{Color, Style};
