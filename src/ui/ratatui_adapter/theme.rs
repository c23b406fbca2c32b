//! Color theme definitions for the ratatui TUI
//!
//! Defines colors and styles used by the prompt widgets.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Background color for the selected line
    pub selection_bg: Color,
    /// Foreground color for the selected line
    pub selection_fg: Color,
    /// Color for matched characters
    pub match_highlight: Color,
    /// Color for the cursor indicator and caret
    pub cursor: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed text (prefix, row numbers, hints)
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            match_highlight: Color::Yellow,
            cursor: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the currently selected line
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for matched characters
    #[must_use]
    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.match_highlight)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
