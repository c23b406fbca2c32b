//! Ratatui widgets for the prompt TUI

mod help_bar;
mod line_list;
mod prompt_bar;

pub use help_bar::{HelpBar, KeyHint};
pub use line_list::LineList;
pub use prompt_bar::{CARET, PromptBar};
