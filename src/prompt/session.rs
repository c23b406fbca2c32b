//! The interactive narrowing loop

use super::keymap::{Action, InputEvent};
use super::query::Query;
use crate::engine::{FilteredView, IndexMap, Line, refilter};
use crate::highlight::Highlighter;
use crate::matcher::Matcher;
use crate::ui::{EventSource, PromptFrame, Renderer};
use crate::Result;
use serde::Serialize;
use tracing::{debug, info};

/// Default number of rows moved by a page action
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Confirmed,
    Cancelled,
}

impl Status {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// What handling one event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// State changed, query untouched; render again
    Continue,
    /// Query edited and view refiltered; render again
    QueryChanged,
    /// Session confirmed
    Confirm,
    /// Session cancelled
    Abort,
    /// Nothing happened
    Ignored,
}

/// Outcome of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub status: Status,
    /// Final query text, empty when cancelled
    pub query: String,
    /// Content the host should hold afterwards
    pub final_content: Vec<String>,
    /// 1-based original row of the selected line, or the starting row
    pub cursor_original_row: usize,
    /// 0-based row of the selection in the narrowed view
    pub selected_row: Option<usize>,
    /// Whether `final_content` differs from the original content
    pub committed: bool,
}

/// Narrowing state: the original lines, the live query and its view
#[derive(Debug, Clone)]
pub struct PromptSession {
    lines: Vec<Line>,
    matcher: Matcher,
    highlighter: Highlighter,
    prefix: String,
    query: Query,
    view: FilteredView,
    index: IndexMap,
    selected: usize,
    origin_row: usize,
    status: Status,
    page_size: usize,
}

impl PromptSession {
    /// Start a session over `lines` with an empty query
    ///
    /// `origin_row` is the 1-based host cursor row; the selection starts on
    /// it.
    #[must_use]
    pub fn new(lines: Vec<Line>, matcher: Matcher, origin_row: usize) -> Self {
        let (view, index) = refilter(&lines, "", &matcher);
        let mut session = Self {
            lines,
            matcher,
            highlighter: Highlighter::default(),
            prefix: String::new(),
            query: Query::default(),
            view,
            index,
            selected: 0,
            origin_row,
            status: Status::Active,
            page_size: DEFAULT_PAGE_SIZE,
        };
        session.select_original(origin_row);
        session
    }

    /// Replace the query, refilter and reselect the starting row
    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self.refresh();
        self.select_original(self.origin_row);
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub const fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub const fn view(&self) -> &FilteredView {
        &self.view
    }

    #[must_use]
    pub const fn index(&self) -> &IndexMap {
        &self.index
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Selected row of the view, if the view has any
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        (!self.view.is_empty()).then_some(self.selected)
    }

    /// Everything a renderer needs for the current state
    #[must_use]
    pub fn frame(&self) -> PromptFrame<'_> {
        PromptFrame {
            prefix: &self.prefix,
            query: &self.query,
            view: &self.view,
            selected: self.selected(),
            total: self.lines.len(),
            highlighter: self.highlighter,
            matcher: self.matcher,
        }
    }

    /// Apply one input event
    ///
    /// Events after the session has ended are ignored.
    pub fn handle(&mut self, event: InputEvent) -> EventResult {
        if self.status.is_terminal() {
            return EventResult::Ignored;
        }

        match event {
            InputEvent::Insert(c) => {
                self.query.insert(c);
                self.refilter()
            }
            InputEvent::Action(action) => self.apply(action),
            InputEvent::Redraw => EventResult::Continue,
            InputEvent::Unbound(key) => {
                debug!(%key, "unbound key");
                EventResult::Ignored
            }
        }
    }

    fn apply(&mut self, action: Action) -> EventResult {
        match action {
            Action::Accept => {
                self.status = Status::Confirmed;
                EventResult::Confirm
            }
            Action::Cancel => {
                self.status = Status::Cancelled;
                EventResult::Abort
            }
            Action::Backspace => self.edit(Query::backspace),
            Action::Delete => self.edit(Query::delete),
            Action::DeleteWord => self.edit(Query::delete_word),
            Action::Clear => self.edit(Query::clear),
            Action::CaretLeft => self.move_caret(Query::caret_left),
            Action::CaretRight => self.move_caret(Query::caret_right),
            Action::CaretHead => self.move_caret(Query::caret_head),
            Action::CaretTail => self.move_caret(Query::caret_tail),
            Action::SelectNext => self.select(self.selected.saturating_add(1)),
            Action::SelectPrevious => self.select(self.selected.saturating_sub(1)),
            Action::SelectFirst => self.select(0),
            Action::SelectLast => self.select(usize::MAX),
            Action::PageUp => self.select(self.selected.saturating_sub(self.page_size)),
            Action::PageDown => self.select(self.selected.saturating_add(self.page_size)),
        }
    }

    fn edit(&mut self, op: fn(&mut Query) -> bool) -> EventResult {
        if op(&mut self.query) {
            self.refilter()
        } else {
            EventResult::Ignored
        }
    }

    fn move_caret(&mut self, op: fn(&mut Query)) -> EventResult {
        let before = self.query.caret();
        op(&mut self.query);
        if self.query.caret() == before {
            EventResult::Ignored
        } else {
            EventResult::Continue
        }
    }

    fn select(&mut self, row: usize) -> EventResult {
        let row = row.min(self.view.len().saturating_sub(1));
        if row == self.selected {
            EventResult::Ignored
        } else {
            self.selected = row;
            EventResult::Continue
        }
    }

    /// Refilter after a query edit, keeping the selected line if still shown
    fn refilter(&mut self) -> EventResult {
        let anchor = self.index.original_row(self.selected);
        self.refresh();
        match anchor.map(|row| self.index.filtered_row(row)) {
            Some(Ok(row)) => self.selected = row,
            _ => self.selected = self.selected.min(self.view.len().saturating_sub(1)),
        }
        EventResult::QueryChanged
    }

    fn refresh(&mut self) {
        let (view, index) = refilter(&self.lines, self.query.text(), &self.matcher);
        self.view = view;
        self.index = index;
    }

    /// Select the row showing `original_row`, or the first one after it, or
    /// the last row
    fn select_original(&mut self, original_row: usize) {
        let last = self.view.len().saturating_sub(1);
        self.selected = match self.index.filtered_row(original_row) {
            Ok(row) => row,
            Err(row) => row.min(last),
        };
    }

    /// Drive the session until it is confirmed or cancelled
    ///
    /// Renders once up front and again after every event that changed
    /// something.
    ///
    /// # Errors
    ///
    /// Propagates event source and renderer failures. The session is left as
    /// it was when the failure happened.
    pub fn run<E, R>(mut self, events: &mut E, renderer: &mut R) -> Result<SessionResult>
    where
        E: EventSource + ?Sized,
        R: Renderer + ?Sized,
    {
        info!(
            lines = self.lines.len(),
            query = self.query.text(),
            matcher = %self.matcher.kind(),
            "prompt session started"
        );

        self.sync_page_size(renderer);
        renderer.render(&self.frame())?;

        while !self.status.is_terminal() {
            let event = events.next_event()?;
            match self.handle(event) {
                EventResult::Continue | EventResult::QueryChanged => {
                    self.sync_page_size(renderer);
                    renderer.render(&self.frame())?;
                }
                EventResult::Confirm | EventResult::Abort | EventResult::Ignored => {}
            }
        }

        let result = self.build_result();
        info!(
            status = ?result.status,
            committed = result.committed,
            row = result.cursor_original_row,
            "prompt session finished"
        );
        Ok(result)
    }

    fn sync_page_size<R: Renderer + ?Sized>(&mut self, renderer: &R) {
        if let Some(rows) = renderer.page_size() {
            self.page_size = rows.max(1);
        }
    }

    /// The result, once the session has ended
    #[must_use]
    pub fn result(&self) -> Option<SessionResult> {
        self.status.is_terminal().then(|| self.build_result())
    }

    fn build_result(&self) -> SessionResult {
        let confirmed = self.status == Status::Confirmed;
        let committed =
            confirmed && !self.view.is_empty() && self.view.len() != self.lines.len();

        let final_content = if committed {
            self.view.texts()
        } else {
            self.lines.iter().map(|l| l.text().to_string()).collect()
        };

        let cursor_original_row = if confirmed {
            self.index
                .original_row(self.selected)
                .unwrap_or(self.origin_row)
        } else {
            self.origin_row
        };

        // A cancelled session drops its query and view
        let (query, selected_row) = if self.status == Status::Cancelled {
            (String::new(), None)
        } else {
            (self.query.text().to_string(), self.selected())
        };

        SessionResult {
            status: self.status,
            query,
            final_content,
            cursor_original_row,
            selected_row,
            committed,
        }
    }
}
