//! Reusable widget abstractions for the TUI

mod dialog;
mod text_input;

pub use dialog::{anchored_rect, centered_rect, DialogBuilder};
pub use text_input::{edit_field, TextInput};
