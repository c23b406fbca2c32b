//! In-order subsequence matching

use super::{MatchOutcome, Span, chars_eq};

/// Greedy leftmost subsequence match
///
/// Each query character takes the earliest position strictly after the one
/// chosen for the previous character.
pub(super) fn match_chars(query: &[char], line: &str, ignore_case: bool) -> MatchOutcome {
    let mut haystack = line.char_indices();
    let mut spans = Vec::with_capacity(query.len());

    for &wanted in query {
        match haystack.find(|&(_, c)| chars_eq(c, wanted, ignore_case)) {
            Some((i, c)) => spans.push(Span::new(i, i + c.len_utf8())),
            None => return MatchOutcome::rejected(),
        }
    }

    MatchOutcome::accepted(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{CaseMode, Matcher, MatcherKind};

    fn fuzzy() -> Matcher {
        Matcher::new(MatcherKind::Fuzzy, CaseMode::Normal)
    }

    #[test]
    fn test_subsequence_passes() {
        let outcome = fuzzy().match_line("fb", "foobar");
        assert!(outcome.pass);
        assert_eq!(outcome.spans, vec![Span::new(0, 1), Span::new(3, 4)]);
    }

    #[test]
    fn test_order_violation_fails() {
        assert!(!fuzzy().match_line("bf", "foobar").pass);
    }

    #[test]
    fn test_greedy_leftmost_positions() {
        let outcome = fuzzy().match_line("oa", "foobar");
        assert_eq!(outcome.spans, vec![Span::new(1, 2), Span::new(4, 5)]);
    }

    #[test]
    fn test_repeated_characters_need_distinct_positions() {
        assert!(fuzzy().match_line("oo", "foo").pass);
        assert!(!fuzzy().match_line("ooo", "foo").pass);
    }

    #[test]
    fn test_whitespace_is_a_query_character() {
        assert!(fuzzy().match_line("a b", "a xb").pass);
        assert!(!fuzzy().match_line("a b", "axb").pass);
    }

    #[test]
    fn test_multibyte_spans() {
        let outcome = fuzzy().match_line("éu", "déjà vu");
        assert!(outcome.pass);
        assert_eq!(outcome.spans, vec![Span::new(1, 3), Span::new(8, 9)]);
    }

    #[test]
    fn test_case_handling() {
        assert!(!fuzzy().match_line("FB", "foobar").pass);
        let ignore = Matcher::new(MatcherKind::Fuzzy, CaseMode::Ignore);
        assert!(ignore.match_line("FB", "foobar").pass);
        let smart = Matcher::new(MatcherKind::Fuzzy, CaseMode::Smart);
        assert!(smart.match_line("fb", "FooBar").pass);
        assert!(!smart.match_line("Fb", "fooBar").pass);
    }
}
