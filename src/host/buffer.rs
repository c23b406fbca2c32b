//! In-memory host

use super::{CursorPosition, Host, PropertyName, PropertyValue, Viewport};
use crate::{ListaError, Result};

/// A plain buffer of lines with a cursor and the guarded properties
///
/// Used by the command-line front end (the file is loaded into a buffer and
/// written back from it) and by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferHost {
    lines: Vec<String>,
    cursor: CursorPosition,
    cursorline: bool,
    filetype: String,
    undolevels: i64,
    viewport: Viewport,
    content_writes: usize,
}

impl BufferHost {
    /// Create a buffer holding `lines` with the cursor on the first row
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            cursor: CursorPosition::default(),
            cursorline: false,
            filetype: String::new(),
            undolevels: 1000,
            viewport: Viewport::default(),
            content_writes: 0,
        }
    }

    /// Build a buffer from string slices
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::new(lines.iter().map(|l| l.as_ref().to_string()).collect())
    }

    /// Set the content type label
    #[must_use]
    pub fn with_filetype(mut self, filetype: impl Into<String>) -> Self {
        self.filetype = filetype.into();
        self
    }

    /// Place the cursor
    #[must_use]
    pub fn with_cursor(mut self, row: usize, col: usize) -> Self {
        self.set_cursor(CursorPosition::new(row, col));
        self
    }

    /// Borrow the lines
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the buffer, returning its lines
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// How many times `set_content` has been called
    #[must_use]
    pub const fn content_writes(&self) -> usize {
        self.content_writes
    }
}

impl Host for BufferHost {
    fn content(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn set_content(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.content_writes += 1;
        // Re-clamp so the cursor never points past the new content
        self.set_cursor(self.cursor);
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    fn set_cursor(&mut self, position: CursorPosition) {
        let last_row = self.lines.len().max(1);
        let row = position.row.clamp(1, last_row);
        let line_len = self.lines.get(row - 1).map_or(0, String::len);
        let mut col = position.col.min(line_len);
        if let Some(line) = self.lines.get(row - 1) {
            while !line.is_char_boundary(col) {
                col -= 1;
            }
        }
        self.cursor = CursorPosition::new(row, col);
    }

    fn property(&self, name: PropertyName) -> PropertyValue {
        match name {
            PropertyName::CursorLine => PropertyValue::Flag(self.cursorline),
            PropertyName::FileType => PropertyValue::Label(self.filetype.clone()),
            PropertyName::UndoLevels => PropertyValue::Level(self.undolevels),
            PropertyName::Viewport => PropertyValue::Viewport(self.viewport),
        }
    }

    fn set_property(&mut self, name: PropertyName, value: PropertyValue) -> Result<()> {
        if !value.fits(name) {
            return Err(ListaError::Host(format!(
                "value {value:?} does not fit property '{name}'"
            )));
        }
        match value {
            PropertyValue::Flag(flag) => self.cursorline = flag,
            PropertyValue::Label(label) => self.filetype = label,
            PropertyValue::Level(level) => self.undolevels = level,
            PropertyValue::Viewport(viewport) => self.viewport = viewport,
        }
        Ok(())
    }
}
