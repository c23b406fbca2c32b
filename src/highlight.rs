//! Presentational view of match spans

use crate::engine::FilteredRow;
use crate::matcher::Span;

/// A piece of a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Exposes match spans for rendering when highlighting is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlighter {
    enabled: bool,
}

impl Highlighter {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Ranges to highlight in `row`; always empty when disabled
    #[must_use]
    pub fn spans<'a>(&self, row: &'a FilteredRow) -> &'a [Span] {
        if self.enabled { row.spans.as_slice() } else { &[] }
    }

    /// Split `row`'s text into alternating plain and highlighted pieces
    ///
    /// Overlapping or touching spans are joined. Empty pieces are skipped.
    #[must_use]
    pub fn segments<'a>(&self, row: &'a FilteredRow) -> Vec<Segment<'a>> {
        let text = row.line.text();
        let mut segments = Vec::new();
        let mut cursor = 0;

        for span in merged(self.spans(row)) {
            let start = span.start.min(text.len());
            let end = span.end.min(text.len());
            if start > cursor {
                segments.push(Segment {
                    text: &text[cursor..start],
                    highlighted: false,
                });
            }
            if end > start {
                segments.push(Segment {
                    text: &text[start..end],
                    highlighted: true,
                });
            }
            cursor = cursor.max(end);
        }

        if cursor < text.len() {
            segments.push(Segment {
                text: &text[cursor..],
                highlighted: false,
            });
        }
        segments
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Sorted union of spans
fn merged(spans: &[Span]) -> Vec<Span> {
    let mut sorted = spans.to_vec();
    sorted.sort_unstable();

    let mut out: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match out.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => out.push(span),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Line;

    fn row(text: &str, spans: Vec<Span>) -> FilteredRow {
        FilteredRow {
            line: Line::new(1, text),
            spans,
        }
    }

    #[test]
    fn test_disabled_produces_no_spans() {
        let r = row("foobar", vec![Span::new(0, 1), Span::new(3, 4)]);
        let off = Highlighter::new(false);
        assert!(off.spans(&r).is_empty());
        assert_eq!(
            off.segments(&r),
            vec![Segment {
                text: "foobar",
                highlighted: false
            }]
        );
    }

    #[test]
    fn test_enabled_exposes_spans() {
        let r = row("foobar", vec![Span::new(0, 1), Span::new(3, 4)]);
        assert_eq!(Highlighter::new(true).spans(&r), &[Span::new(0, 1), Span::new(3, 4)]);
    }

    #[test]
    fn test_segments_alternate() {
        let r = row("xxfooyybarzz", vec![Span::new(2, 5), Span::new(7, 10)]);
        let pieces: Vec<(&str, bool)> = Highlighter::default()
            .segments(&r)
            .into_iter()
            .map(|s| (s.text, s.highlighted))
            .collect();
        assert_eq!(
            pieces,
            vec![
                ("xx", false),
                ("foo", true),
                ("yy", false),
                ("bar", true),
                ("zz", false)
            ]
        );
    }

    #[test]
    fn test_overlapping_spans_join_for_display() {
        let r = row("abcd", vec![Span::new(1, 3), Span::new(0, 2)]);
        let pieces: Vec<(&str, bool)> = Highlighter::default()
            .segments(&r)
            .into_iter()
            .map(|s| (s.text, s.highlighted))
            .collect();
        assert_eq!(pieces, vec![("abc", true), ("d", false)]);
    }

    #[test]
    fn test_segments_of_empty_line() {
        let r = row("", vec![]);
        assert!(Highlighter::default().segments(&r).is_empty());
    }
}
