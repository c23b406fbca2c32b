//! Literal token matching

use super::{MatchOutcome, Span, chars_eq};

/// Whitespace-separated tokens of a query
pub(super) fn tokens(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// Pass iff every token occurs in `line`; one span per token, at its first
/// occurrence
pub(super) fn match_tokens(tokens: &[&str], line: &str, ignore_case: bool) -> MatchOutcome {
    let mut spans = Vec::with_capacity(tokens.len());
    for token in tokens {
        match find(line, token, ignore_case) {
            Some(span) => spans.push(span),
            None => return MatchOutcome::rejected(),
        }
    }
    MatchOutcome::accepted(spans)
}

/// First occurrence of `token` in `line`
fn find(line: &str, token: &str, ignore_case: bool) -> Option<Span> {
    if !ignore_case {
        return line
            .find(token)
            .map(|start| Span::new(start, start + token.len()));
    }

    line.char_indices()
        .find_map(|(start, _)| match_at(&line[start..], token).map(|len| Span::new(start, start + len)))
}

/// Byte length of the prefix of `haystack` matching `token` without regard to
/// case
fn match_at(haystack: &str, token: &str) -> Option<usize> {
    let mut rest = haystack.char_indices();
    let mut end = 0;
    for wanted in token.chars() {
        let (i, c) = rest.next()?;
        if !chars_eq(c, wanted, true) {
            return None;
        }
        end = i + c.len_utf8();
    }
    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{CaseMode, Matcher, MatcherKind};

    fn and_matcher() -> Matcher {
        Matcher::new(MatcherKind::And, CaseMode::Normal)
    }

    #[test]
    fn test_all_tokens_present() {
        let outcome = and_matcher().match_line("foo bar", "xxfooyybarzz");
        assert!(outcome.pass);
        assert_eq!(outcome.spans, vec![Span::new(2, 5), Span::new(7, 10)]);
    }

    #[test]
    fn test_missing_token_fails() {
        let outcome = and_matcher().match_line("foo bar", "xxfooyy");
        assert!(!outcome.pass);
        assert!(outcome.spans.is_empty());
    }

    #[test]
    fn test_spans_follow_token_order() {
        let outcome = and_matcher().match_line("bar foo", "foobar");
        assert_eq!(outcome.spans, vec![Span::new(3, 6), Span::new(0, 3)]);
    }

    #[test]
    fn test_overlapping_spans_not_merged() {
        let outcome = and_matcher().match_line("ab bc", "abc");
        assert!(outcome.pass);
        assert_eq!(outcome.spans, vec![Span::new(0, 2), Span::new(1, 3)]);
    }

    #[test]
    fn test_repeated_token_uses_first_occurrence() {
        let outcome = and_matcher().match_line("a a", "banana");
        assert_eq!(outcome.spans, vec![Span::new(1, 2), Span::new(1, 2)]);
    }

    #[test]
    fn test_case_sensitive_by_default() {
        assert!(!and_matcher().match_line("Foo", "foo").pass);
    }

    #[test]
    fn test_ignore_case() {
        let matcher = Matcher::new(MatcherKind::And, CaseMode::Ignore);
        let outcome = matcher.match_line("FOO", "a Foo b");
        assert!(outcome.pass);
        assert_eq!(outcome.spans, vec![Span::new(2, 5)]);
    }

    #[test]
    fn test_ignore_case_multibyte() {
        let matcher = Matcher::new(MatcherKind::And, CaseMode::Ignore);
        let outcome = matcher.match_line("été", "Un ÉTÉ chaud");
        assert!(outcome.pass);
        let span = outcome.spans[0];
        assert_eq!(&"Un ÉTÉ chaud"[span.start..span.end], "ÉTÉ");
    }

    #[test]
    fn test_tokens_split_on_any_whitespace() {
        assert_eq!(tokens(" foo\tbar  baz "), vec!["foo", "bar", "baz"]);
        assert!(tokens("").is_empty());
    }
}
