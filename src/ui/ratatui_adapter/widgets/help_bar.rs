//! Help bar widget for displaying keybind hints

use crate::prompt::{Action, Keymap};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "<CR>", "<C-n>")
    pub key: String,
    /// Action description (e.g., "accept")
    pub action: String,
}

impl KeyHint {
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }

    /// One hint per commonly used action that has a key in `keymap`
    #[must_use]
    pub fn from_keymap(keymap: &Keymap) -> Vec<Self> {
        [
            (Action::Accept, "accept"),
            (Action::Cancel, "cancel"),
            (Action::SelectNext, "next"),
            (Action::SelectPrevious, "previous"),
            (Action::Clear, "clear"),
        ]
        .into_iter()
        .filter_map(|(action, label)| {
            let key = keymap.keys_for(action).into_iter().next()?;
            Some(Self::new(key.to_string(), label))
        })
        .collect()
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
