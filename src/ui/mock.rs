//! Scripted front end for testing

use super::traits::{EventSource, PromptFrame, Renderer};
use crate::prompt::{InputEvent, Key, Keymap};
use crate::{ListaError, Result};
use std::collections::VecDeque;

/// Event source that replays predetermined events
///
/// Useful for testing without requiring user interaction. Once the script is
/// exhausted it reports [`ListaError::InputClosed`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    events: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Script key expressions, resolved through `keymap`
    ///
    /// # Panics
    /// Panics if an expression does not parse.
    #[must_use]
    pub fn keys(keymap: &Keymap, exprs: &[&str]) -> Self {
        Self::new(exprs.iter().map(|expr| {
            let key = Key::parse(expr).expect("test key expression should parse");
            keymap.resolve(key)
        }))
    }

    /// Script typing `text` one character at a time, followed by `then`
    #[must_use]
    pub fn typing(text: &str, then: impl IntoIterator<Item = InputEvent>) -> Self {
        Self::new(text.chars().map(InputEvent::Insert).chain(then))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Result<InputEvent> {
        self.events.pop_front().ok_or(ListaError::InputClosed)
    }
}

/// Owned copy of what one render showed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub prefix: String,
    pub query: String,
    pub caret: usize,
    pub rows: Vec<String>,
    pub selected: Option<usize>,
    pub highlighted: Vec<Vec<String>>,
}

/// Renderer that keeps every frame it is given
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RecordedFrame>,
    page_size: Option<usize>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn with_page_size(rows: usize) -> Self {
        Self {
            frames: Vec::new(),
            page_size: Some(rows),
        }
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &PromptFrame<'_>) -> Result<()> {
        let highlighted = frame
            .view
            .iter()
            .map(|row| {
                frame
                    .highlighter
                    .segments(row)
                    .into_iter()
                    .filter(|s| s.highlighted)
                    .map(|s| s.text.to_string())
                    .collect()
            })
            .collect();

        self.frames.push(RecordedFrame {
            prefix: frame.prefix.to_string(),
            query: frame.query.text().to_string(),
            caret: frame.query.caret(),
            rows: frame.view.texts(),
            selected: frame.selected,
            highlighted,
        });
        Ok(())
    }

    fn page_size(&self) -> Option<usize> {
        self.page_size
    }
}

/// Renderer that fails on every draw
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _frame: &PromptFrame<'_>) -> Result<()> {
        Err(ListaError::UiError(super::UiError::TerminalError(
            "display went away".to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Action;

    #[test]
    fn test_scripted_events_in_order() {
        let mut events = ScriptedEvents::typing("ab", [InputEvent::Action(Action::Accept)]);
        assert_eq!(events.remaining(), 3);
        assert_eq!(events.next_event().unwrap(), InputEvent::Insert('a'));
        assert_eq!(events.next_event().unwrap(), InputEvent::Insert('b'));
        assert_eq!(
            events.next_event().unwrap(),
            InputEvent::Action(Action::Accept)
        );
        assert!(matches!(events.next_event(), Err(ListaError::InputClosed)));
    }

    #[test]
    fn test_scripted_keys_use_keymap() {
        let mut events = ScriptedEvents::keys(&Keymap::default(), &["x", "<C-n>", "<CR>"]);
        assert_eq!(events.next_event().unwrap(), InputEvent::Insert('x'));
        assert_eq!(
            events.next_event().unwrap(),
            InputEvent::Action(Action::SelectNext)
        );
        assert_eq!(
            events.next_event().unwrap(),
            InputEvent::Action(Action::Accept)
        );
    }
}
