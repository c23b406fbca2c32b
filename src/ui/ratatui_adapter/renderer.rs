//! Ratatui-based prompt renderer

use super::theme::Theme;
use super::widgets::{HelpBar, KeyHint, LineList, PromptBar};
use crate::ui::{PromptFrame, Renderer, UiError};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};

/// Draws prompt frames on a ratatui terminal
///
/// Layout, top to bottom: prompt bar, line list, hint bar. The renderer keeps
/// the list's scroll position so the selected row stays visible.
pub struct RatatuiRenderer<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
    hints: Vec<KeyHint>,
    scroll_offset: usize,
    visible_rows: usize,
}

impl<B: Backend> RatatuiRenderer<B> {
    #[must_use]
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            theme: Theme::default(),
            hints: Vec::new(),
            scroll_offset: 0,
            visible_rows: 0,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    #[must_use]
    pub const fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn draw(
        frame: &mut Frame,
        prompt: &PromptFrame<'_>,
        theme: &Theme,
        hints: &[KeyHint],
        scroll_offset: &mut usize,
        visible_rows: &mut usize,
    ) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Prompt bar
                Constraint::Min(3),    // Lines
                Constraint::Length(1), // Hints
            ])
            .split(frame.area());

        frame.render_widget(
            PromptBar::new(prompt.prefix, prompt.query, prompt.matcher, theme),
            layout[0],
        );

        *visible_rows = layout[1].height.saturating_sub(2) as usize;
        *scroll_offset = scroll_to(
            *scroll_offset,
            prompt.selected.unwrap_or(0),
            *visible_rows,
            prompt.view.len(),
        );

        frame.render_widget(
            LineList::new(prompt.view, prompt.total, theme)
                .selected(prompt.selected)
                .scroll_offset(*scroll_offset)
                .highlighter(prompt.highlighter),
            layout[1],
        );

        frame.render_widget(HelpBar::new(hints, theme), layout[2]);
    }
}

impl<B: Backend> Renderer for RatatuiRenderer<B> {
    fn render(&mut self, prompt: &PromptFrame<'_>) -> crate::Result<()> {
        let Self {
            terminal,
            theme,
            hints,
            scroll_offset,
            visible_rows,
        } = self;

        terminal
            .draw(|frame| Self::draw(frame, prompt, theme, hints, scroll_offset, visible_rows))
            .map_err(|e| UiError::TerminalError(e.to_string()))?;
        Ok(())
    }

    fn page_size(&self) -> Option<usize> {
        (self.visible_rows > 0).then_some(self.visible_rows)
    }
}

/// Scroll offset that keeps `selected` visible in a window of `height` rows
/// over `len` rows, moving as little as possible
fn scroll_to(offset: usize, selected: usize, height: usize, len: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let offset = if selected < offset {
        selected
    } else if selected >= offset + height {
        selected + 1 - height
    } else {
        offset
    };
    offset.min(len.saturating_sub(height))
}
