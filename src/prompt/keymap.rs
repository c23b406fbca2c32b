//! Key bindings for the prompt

use super::key::Key;
use crate::{ListaError, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Something the prompt can do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Accept,
    Cancel,
    Backspace,
    Delete,
    DeleteWord,
    Clear,
    CaretLeft,
    CaretRight,
    CaretHead,
    CaretTail,
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
    PageUp,
    PageDown,
}

impl Action {
    pub const ALL: [Self; 16] = [
        Self::Accept,
        Self::Cancel,
        Self::Backspace,
        Self::Delete,
        Self::DeleteWord,
        Self::Clear,
        Self::CaretLeft,
        Self::CaretRight,
        Self::CaretHead,
        Self::CaretTail,
        Self::SelectNext,
        Self::SelectPrevious,
        Self::SelectFirst,
        Self::SelectLast,
        Self::PageUp,
        Self::PageDown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Cancel => "cancel",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::DeleteWord => "delete_word",
            Self::Clear => "clear",
            Self::CaretLeft => "caret_left",
            Self::CaretRight => "caret_right",
            Self::CaretHead => "caret_head",
            Self::CaretTail => "caret_tail",
            Self::SelectNext => "select_next",
            Self::SelectPrevious => "select_previous",
            Self::SelectFirst => "select_first",
            Self::SelectLast => "select_last",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ListaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ListaError::InvalidConfiguration(format!("unknown action '{s}'")))
    }
}

/// One unit of input for the prompt session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Type a character at the caret
    Insert(char),
    /// Run a bound action
    Action(Action),
    /// Redraw without changing anything (terminal resize)
    Redraw,
    /// A key with no binding
    Unbound(Key),
}

/// Action name that removes a default binding
const UNBIND: &str = "none";

/// Map from keys to prompt actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<Key, Action>,
}

impl Keymap {
    /// A keymap with no bindings at all
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any earlier binding of `key`
    pub fn bind(&mut self, key: Key, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn unbind(&mut self, key: Key) {
        self.bindings.remove(&key);
    }

    /// Apply user bindings on top of this keymap
    ///
    /// Keys are key expressions (`"<C-n>"`, `"ctrl-n"`), values are action
    /// names or `"none"` to drop a binding.
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::InvalidConfiguration`] for an unknown key or action.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Result<Self> {
        for (expr, action) in overrides {
            let key = Key::parse(expr)?;
            if action == UNBIND {
                self.unbind(key);
            } else {
                self.bind(key, action.parse()?);
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, key: &Key) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Turn a key press into a prompt event
    ///
    /// Bound keys win. Otherwise a printable character without control or
    /// alt is inserted, and anything else is unbound.
    #[must_use]
    pub fn resolve(&self, key: Key) -> InputEvent {
        if let Some(action) = self.get(&key) {
            return InputEvent::Action(action);
        }
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                InputEvent::Insert(c)
            }
            _ => InputEvent::Unbound(key),
        }
    }

    /// Keys bound to `action`, in display order
    #[must_use]
    pub fn keys_for(&self, action: Action) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .bindings
            .iter()
            .filter(|&(_, bound)| *bound == action)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_cached_key(ToString::to_string);
        keys
    }

}

impl Default for Keymap {
    fn default() -> Self {
        use Action::{
            Accept, Backspace, Cancel, CaretHead, CaretLeft, CaretRight, CaretTail, Clear, Delete,
            DeleteWord, PageDown, PageUp, SelectFirst, SelectLast, SelectNext, SelectPrevious,
        };

        let ctrl = KeyModifiers::CONTROL;
        let defaults = [
            (Key::plain(KeyCode::Enter), Accept),
            (Key::plain(KeyCode::Esc), Cancel),
            (Key::ctrl('c'), Cancel),
            (Key::plain(KeyCode::Backspace), Backspace),
            (Key::ctrl('h'), Backspace),
            (Key::plain(KeyCode::Delete), Delete),
            (Key::ctrl('w'), DeleteWord),
            (Key::ctrl('u'), Clear),
            (Key::plain(KeyCode::Left), CaretLeft),
            (Key::ctrl('b'), CaretLeft),
            (Key::plain(KeyCode::Right), CaretRight),
            (Key::ctrl('f'), CaretRight),
            (Key::plain(KeyCode::Home), CaretHead),
            (Key::ctrl('a'), CaretHead),
            (Key::plain(KeyCode::End), CaretTail),
            (Key::ctrl('e'), CaretTail),
            (Key::plain(KeyCode::Down), SelectNext),
            (Key::plain(KeyCode::Tab), SelectNext),
            (Key::ctrl('n'), SelectNext),
            (Key::ctrl('j'), SelectNext),
            (Key::plain(KeyCode::Up), SelectPrevious),
            (Key::plain(KeyCode::BackTab), SelectPrevious),
            (Key::ctrl('p'), SelectPrevious),
            (Key::ctrl('k'), SelectPrevious),
            (Key::new(KeyCode::Home, ctrl), SelectFirst),
            (Key::new(KeyCode::End, ctrl), SelectLast),
            (Key::plain(KeyCode::PageUp), PageUp),
            (Key::plain(KeyCode::PageDown), PageDown),
        ];

        Self {
            bindings: defaults.into_iter().collect(),
        }
    }
}
