//! Event handling for the ratatui TUI
//!
//! Reads crossterm events and maps them to prompt input events through a
//! [`Keymap`].

use crate::prompt::{InputEvent, Key, Keymap};
use crate::ui::{EventSource, UiError};
use crossterm::event::{self, Event, KeyEventKind};

/// Event source reading key presses from the terminal
#[derive(Debug, Clone)]
pub struct TerminalEvents {
    keymap: Keymap,
}

impl TerminalEvents {
    #[must_use]
    pub const fn new(keymap: Keymap) -> Self {
        Self { keymap }
    }
}

/// Map one terminal event to a prompt event
///
/// Key releases, focus changes and mouse events produce nothing.
#[must_use]
pub fn translate(keymap: &Keymap, event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            Some(keymap.resolve(Key::from(*key)))
        }
        Event::Resize(_, _) => Some(InputEvent::Redraw),
        _ => None,
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> crate::Result<InputEvent> {
        loop {
            let event = event::read().map_err(UiError::from)?;
            if let Some(input) = translate(&self.keymap, &event) {
                return Ok(input);
            }
        }
    }
}
