mod color_input;
mod text_input;

use std::sync::OnceLock;

use regex::Regex;

pub use color_input::{ColorInput, ColorOutcome};
pub use text_input::{InputOutcome, TextInput};

/// True for `#rrggbb`, the only form a color input produces
pub fn is_hex_color(s: &str) -> bool {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR
        .get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color regex"))
        .is_match(s)
}
