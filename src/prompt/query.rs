//! Editable query text with a caret

use serde::{Deserialize, Serialize};

/// The live query and the caret's byte offset into it
///
/// The caret always sits on a char boundary, between 0 and `text.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "QueryParts")]
pub struct Query {
    text: String,
    caret: usize,
}

#[derive(Deserialize)]
struct QueryParts {
    text: String,
    #[serde(default)]
    caret: Option<usize>,
}

impl From<QueryParts> for Query {
    fn from(parts: QueryParts) -> Self {
        let caret = parts.caret.unwrap_or(parts.text.len());
        Self::with_caret(parts.text, caret)
    }
}

impl Query {
    /// A query with the caret after the last character
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.len();
        Self { text, caret }
    }

    /// A query with the caret at `caret`, moved back onto a char boundary
    /// and clamped to the text
    #[must_use]
    pub fn with_caret(text: impl Into<String>, caret: usize) -> Self {
        let text = text.into();
        let mut caret = caret.min(text.len());
        while !text.is_char_boundary(caret) {
            caret -= 1;
        }
        Self { text, caret }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text before and after the caret
    #[must_use]
    pub fn split_at_caret(&self) -> (&str, &str) {
        self.text.split_at(self.caret)
    }

    /// Insert a character at the caret
    pub fn insert(&mut self, c: char) {
        self.text.insert(self.caret, c);
        self.caret += c.len_utf8();
    }

    /// Remove the character before the caret; `false` if there is none
    pub fn backspace(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.text.remove(prev);
                self.caret = prev;
                true
            }
            None => false,
        }
    }

    /// Remove the character under the caret; `false` if there is none
    pub fn delete(&mut self) -> bool {
        if self.caret < self.text.len() {
            self.text.remove(self.caret);
            true
        } else {
            false
        }
    }

    /// Remove the word before the caret, and the blanks after it
    pub fn delete_word(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let before = &self.text[..self.caret];
        let trimmed = before.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        self.text.drain(start..self.caret);
        self.caret = start;
        true
    }

    /// Empty the query; `false` if it was already empty
    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        self.caret = 0;
        changed
    }

    pub fn caret_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.caret = prev;
        }
    }

    pub fn caret_right(&mut self) {
        if let Some(c) = self.text[self.caret..].chars().next() {
            self.caret += c.len_utf8();
        }
    }

    pub const fn caret_head(&mut self) {
        self.caret = 0;
    }

    pub fn caret_tail(&mut self) {
        self.caret = self.text.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.caret].char_indices().next_back().map(|(i, _)| i)
    }
}
