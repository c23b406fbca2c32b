//! Line list widget for displaying the narrowed view

use crate::engine::{FilteredRow, FilteredView};
use crate::highlight::Highlighter;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// Line list widget showing matched lines with their original row numbers
pub struct LineList<'a> {
    view: &'a FilteredView,
    /// Selected row of the view
    selected: Option<usize>,
    /// First view row to draw
    scroll_offset: usize,
    /// Number of original lines
    total: usize,
    highlighter: Highlighter,
    theme: &'a Theme,
}

impl<'a> LineList<'a> {
    #[must_use]
    pub const fn new(view: &'a FilteredView, total: usize, theme: &'a Theme) -> Self {
        Self {
            view,
            selected: None,
            scroll_offset: 0,
            total,
            highlighter: Highlighter::new(true),
            theme,
        }
    }

    #[must_use]
    pub const fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub const fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    #[must_use]
    pub const fn highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    fn render_row(&self, row: &'a FilteredRow, is_cursor: bool, gutter: usize) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };

        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(
                format!("{:>gutter$} ", row.line.row()),
                self.theme.dimmed_style(),
            ),
        ];

        spans.extend(self.highlighter.segments(row).into_iter().map(|segment| {
            if segment.highlighted {
                Span::styled(segment.text, self.theme.match_style())
            } else {
                Span::raw(segment.text)
            }
        }));

        let item = ListItem::new(Line::from(spans));
        if is_cursor {
            item.style(self.theme.selected_style())
        } else {
            item
        }
    }
}

impl Widget for LineList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {}/{} ", self.view.len(), self.total);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let gutter = self.total.max(1).to_string().len();
        let visible_height = inner.height as usize;
        let start = self.scroll_offset.min(self.view.len());
        let end = (start + visible_height).min(self.view.len());

        let items: Vec<ListItem> = self.view.rows()[start..end]
            .iter()
            .enumerate()
            .map(|(i, row)| self.render_row(row, self.selected == Some(start + i), gutter))
            .collect();

        List::new(items).render(inner, buf);
    }
}
