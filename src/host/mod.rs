//! Host abstraction
//!
//! The host owns the text being narrowed: its lines, its cursor, and a small
//! set of display/editing properties that the session changes while it runs
//! and that [`StateGuard`](crate::guard::StateGuard) puts back afterwards.
//!
//! Any editor-like surface can act as a host. [`BufferHost`] is the in-memory
//! implementation used by the command-line front end and the tests.

mod buffer;

pub use buffer::BufferHost;

use crate::{ListaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cursor location inside the host content
///
/// `row` is 1-based, `col` is a 0-based byte offset into the row's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub row: usize,
    pub col: usize,
}

impl CursorPosition {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Scroll state of the host's window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// First visible row (1-based, 0 when the host has never scrolled)
    pub top: usize,
    /// First visible byte column
    pub left: usize,
}

/// Host properties the state guard knows how to save and restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyName {
    /// Whether the cursor line is visually marked
    CursorLine,
    /// Label describing the kind of content shown
    FileType,
    /// Undo-history level; negative disables history recording
    UndoLevels,
    /// Scroll state of the window
    Viewport,
}

impl PropertyName {
    /// Every supported property, in snapshot order
    pub const ALL: [Self; 4] = [
        Self::CursorLine,
        Self::FileType,
        Self::UndoLevels,
        Self::Viewport,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CursorLine => "cursorline",
            Self::FileType => "filetype",
            Self::UndoLevels => "undolevels",
            Self::Viewport => "viewport",
        }
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyName {
    type Err = ListaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ListaError::UnsupportedProperty(s.to_string()))
    }
}

/// Value of a host property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Flag(bool),
    Label(String),
    Level(i64),
    Viewport(Viewport),
}

impl PropertyValue {
    /// Whether this value has the shape `name` expects
    #[must_use]
    pub const fn fits(&self, name: PropertyName) -> bool {
        matches!(
            (name, self),
            (PropertyName::CursorLine, Self::Flag(_))
                | (PropertyName::FileType, Self::Label(_))
                | (PropertyName::UndoLevels, Self::Level(_))
                | (PropertyName::Viewport, Self::Viewport(_))
        )
    }
}

/// The surface whose lines are narrowed
///
/// Content is read once when a session starts and written at most once when
/// it ends. Property writes may fail (a host can refuse a value); reads
/// cannot.
pub trait Host {
    /// Current lines, in order
    fn content(&self) -> Vec<String>;

    /// Replace every line
    fn set_content(&mut self, lines: Vec<String>);

    /// Current cursor position
    fn cursor(&self) -> CursorPosition;

    /// Move the cursor; hosts clamp out-of-range positions
    fn set_cursor(&mut self, position: CursorPosition);

    /// Current value of a property
    fn property(&self, name: PropertyName) -> PropertyValue;

    /// Apply a property value
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::Host`] if the host rejects the value.
    fn set_property(&mut self, name: PropertyName, value: PropertyValue) -> Result<()>;
}
