//! Seams between the prompt session and a front end

use crate::engine::FilteredView;
use crate::highlight::Highlighter;
use crate::matcher::Matcher;
use crate::prompt::{InputEvent, Query};

/// Supplies input events to a prompt session, one at a time
pub trait EventSource {
    /// Block until the next event is available
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::InputClosed`](crate::ListaError::InputClosed)
    /// when no more events will arrive, or the front end's own error.
    fn next_event(&mut self) -> crate::Result<InputEvent>;
}

/// Draws the prompt state
pub trait Renderer {
    /// Draw `frame`
    ///
    /// # Errors
    ///
    /// Returns the front end's error if drawing fails.
    fn render(&mut self, frame: &PromptFrame<'_>) -> crate::Result<()>;

    /// Number of list rows currently visible, used for paging
    fn page_size(&self) -> Option<usize> {
        None
    }
}

/// Borrowed view of a prompt session for one render
#[derive(Debug, Clone, Copy)]
pub struct PromptFrame<'a> {
    /// Label shown before the query
    pub prefix: &'a str,
    pub query: &'a Query,
    pub view: &'a FilteredView,
    /// Selected row of `view`, `None` when the view is empty
    pub selected: Option<usize>,
    /// Number of original lines
    pub total: usize,
    pub highlighter: Highlighter,
    pub matcher: Matcher,
}
