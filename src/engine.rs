//! Filtering of the original lines into the narrowed view
//!
//! [`refilter`] is a pure function of (lines, query, matcher): it keeps the
//! lines that pass, in their original order, and pairs the result with an
//! [`IndexMap`] from narrowed rows back to original rows. Because the filter is
//! stable, the index map is strictly increasing, which is what lets the
//! session find a line again after the query changes.

use crate::matcher::{Matcher, Span};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One original line and its 1-based position in the host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    row: usize,
    text: Arc<str>,
}

impl Line {
    #[must_use]
    pub fn new(row: usize, text: impl Into<Arc<str>>) -> Self {
        Self {
            row,
            text: text.into(),
        }
    }

    /// Number host content, starting at row 1
    #[must_use]
    pub fn number_all<I, S>(content: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        content
            .into_iter()
            .enumerate()
            .map(|(i, text)| Self::new(i + 1, text))
            .collect()
    }

    /// 1-based original row
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A line that passed the matcher, with the ranges it matched on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredRow {
    pub line: Line,
    pub spans: Vec<Span>,
}

/// The lines currently passing the matcher, in original order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilteredView {
    rows: Vec<FilteredRow>,
}

impl FilteredView {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize) -> Option<&FilteredRow> {
        self.rows.get(row)
    }

    #[must_use]
    pub fn rows(&self) -> &[FilteredRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilteredRow> {
        self.rows.iter()
    }

    /// Line texts of the view, in order
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.line.text().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a FilteredView {
    type Item = &'a FilteredRow;
    type IntoIter = std::slice::Iter<'a, FilteredRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Map from 0-based filtered rows to 1-based original rows
///
/// Always strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct IndexMap {
    rows: Vec<usize>,
}

impl IndexMap {
    /// Build a map from original rows
    ///
    /// Returns `None` unless the rows are 1-based and strictly increasing.
    #[must_use]
    pub fn new(rows: Vec<usize>) -> Option<Self> {
        let increasing = rows.windows(2).all(|w| w[0] < w[1]);
        let one_based = rows.first().is_none_or(|&first| first >= 1);
        (increasing && one_based).then_some(Self { rows })
    }

    /// The map of an unfiltered view of `len` lines
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self {
            rows: (1..=len).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Original row shown at `filtered_row`
    #[must_use]
    pub fn original_row(&self, filtered_row: usize) -> Option<usize> {
        self.rows.get(filtered_row).copied()
    }

    /// Filtered row showing `original_row`
    ///
    /// `Err` holds the filtered row where `original_row` would be inserted,
    /// i.e. the first row showing a later original line.
    pub fn filtered_row(&self, original_row: usize) -> Result<usize, usize> {
        self.rows.binary_search(&original_row)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.rows
    }
}

/// Keep the lines passing `matcher` for `query`
///
/// Deterministic: identical inputs always give identical outputs. With an
/// empty query the view is every line and the map is the identity.
#[must_use]
pub fn refilter(lines: &[Line], query: &str, matcher: &Matcher) -> (FilteredView, IndexMap) {
    let prepared = matcher.prepare(query);
    let mut rows = Vec::new();
    let mut index = Vec::new();

    for line in lines {
        let outcome = prepared.match_line(line.text());
        if outcome.pass {
            index.push(line.row());
            rows.push(FilteredRow {
                line: line.clone(),
                spans: outcome.spans,
            });
        }
    }

    debug!(
        query,
        matcher = %matcher.kind(),
        matched = rows.len(),
        total = lines.len(),
        "refiltered"
    );

    (FilteredView { rows }, IndexMap { rows: index })
}
