//! Prompt bar widget for query input

use crate::matcher::{CaseMode, Matcher};
use crate::prompt::Query;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Glyph drawn at the caret position
pub const CARET: &str = "│";

/// Prompt bar widget that displays the prefix and the query with its caret
pub struct PromptBar<'a> {
    /// Label shown before the query
    prefix: &'a str,
    query: &'a Query,
    matcher: Matcher,
    theme: &'a Theme,
}

impl<'a> PromptBar<'a> {
    #[must_use]
    pub const fn new(prefix: &'a str, query: &'a Query, matcher: Matcher, theme: &'a Theme) -> Self {
        Self {
            prefix,
            query,
            matcher,
            theme,
        }
    }

    /// Block title naming the matcher, and the case mode unless it is the default
    fn title(&self) -> String {
        match self.matcher.case() {
            CaseMode::Normal => format!(" {} ", self.matcher.kind()),
            case => format!(" {} / {} ", self.matcher.kind(), case),
        }
    }
}

impl Widget for PromptBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(self.title());

        let inner = block.inner(area);
        block.render(area, buf);

        let (before, after) = self.query.split_at_caret();
        let line = Line::from(vec![
            Span::styled(self.prefix, self.theme.dimmed_style()),
            Span::raw(before),
            Span::styled(CARET, Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::raw(after),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
