//! Line matching strategies
//!
//! A matcher decides whether a line passes the current query and which byte
//! ranges of the line to highlight. Two strategies exist:
//!
//! - **and**: every whitespace-separated token of the query must occur
//!   literally in the line
//! - **fuzzy**: the query's characters must occur in the line in order, with
//!   gaps allowed
//!
//! The strategy is chosen once, when the configuration is validated, and is
//! fixed for the whole session.
//!
//! ```
//! use lista::matcher::{CaseMode, Matcher, MatcherKind, Span};
//!
//! let matcher = Matcher::new(MatcherKind::Fuzzy, CaseMode::Normal);
//! let outcome = matcher.match_line("fb", "foobar");
//! assert!(outcome.pass);
//! assert_eq!(outcome.spans, vec![Span::new(0, 1), Span::new(3, 4)]);
//! ```

mod and;
mod fuzzy;

use crate::{ListaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Half-open byte range `[start, end)` into a line
///
/// Both ends always fall on char boundaries of the line it was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result of matching one line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchOutcome {
    /// Whether the line passes the query
    pub pass: bool,
    /// Ranges to highlight, in query order (may overlap)
    pub spans: Vec<Span>,
}

impl MatchOutcome {
    /// A passing outcome
    #[must_use]
    pub const fn accepted(spans: Vec<Span>) -> Self {
        Self { pass: true, spans }
    }

    /// A failing outcome
    #[must_use]
    pub const fn rejected() -> Self {
        Self {
            pass: false,
            spans: Vec::new(),
        }
    }
}

/// Which matching strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// All whitespace-separated tokens must appear literally
    #[default]
    And,
    /// Query characters must appear in order
    Fuzzy,
}

impl MatcherKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatcherKind {
    type Err = ListaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "and" => Ok(Self::And),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(ListaError::InvalidConfiguration(format!(
                "unknown matcher '{other}' (expected \"and\" or \"fuzzy\")"
            ))),
        }
    }
}

/// How letter case is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Case-sensitive
    #[default]
    Normal,
    /// Case-insensitive
    Ignore,
    /// Case-insensitive unless the query contains an uppercase letter
    Smart,
}

impl CaseMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Ignore => "ignore",
            Self::Smart => "smart",
        }
    }

    /// Whether `query` should be compared without regard to case
    #[must_use]
    pub fn ignores_case(&self, query: &str) -> bool {
        match self {
            Self::Normal => false,
            Self::Ignore => true,
            Self::Smart => !query.chars().any(char::is_uppercase),
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseMode {
    type Err = ListaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "ignore" => Ok(Self::Ignore),
            "smart" => Ok(Self::Smart),
            other => Err(ListaError::InvalidConfiguration(format!(
                "unknown case mode '{other}' (expected \"normal\", \"ignore\" or \"smart\")"
            ))),
        }
    }
}

/// A matching strategy together with its case handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Matcher {
    kind: MatcherKind,
    case: CaseMode,
}

impl Matcher {
    #[must_use]
    pub const fn new(kind: MatcherKind, case: CaseMode) -> Self {
        Self { kind, case }
    }

    #[must_use]
    pub const fn kind(&self) -> MatcherKind {
        self.kind
    }

    #[must_use]
    pub const fn case(&self) -> CaseMode {
        self.case
    }

    /// Split `query` once so it can be applied to many lines
    #[must_use]
    pub fn prepare<'q>(&self, query: &'q str) -> PreparedQuery<'q> {
        let ignore_case = self.case.ignores_case(query);
        let pattern = match self.kind {
            MatcherKind::And => Pattern::Tokens(and::tokens(query)),
            MatcherKind::Fuzzy => Pattern::Chars(query.chars().collect()),
        };
        PreparedQuery {
            pattern,
            ignore_case,
        }
    }

    /// Match a single line against `query`
    #[must_use]
    pub fn match_line(&self, query: &str, line: &str) -> MatchOutcome {
        self.prepare(query).match_line(line)
    }
}

#[derive(Debug, Clone)]
enum Pattern<'q> {
    Tokens(Vec<&'q str>),
    Chars(Vec<char>),
}

/// A query split for one strategy
#[derive(Debug, Clone)]
pub struct PreparedQuery<'q> {
    pattern: Pattern<'q>,
    ignore_case: bool,
}

impl PreparedQuery<'_> {
    /// Whether every line passes (the query has nothing to match)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.pattern {
            Pattern::Tokens(tokens) => tokens.is_empty(),
            Pattern::Chars(chars) => chars.is_empty(),
        }
    }

    #[must_use]
    pub fn match_line(&self, line: &str) -> MatchOutcome {
        match &self.pattern {
            Pattern::Tokens(tokens) => and::match_tokens(tokens, line, self.ignore_case),
            Pattern::Chars(chars) => fuzzy::match_chars(chars, line, self.ignore_case),
        }
    }
}

/// Character equality, optionally ignoring case
fn chars_eq(a: char, b: char, ignore_case: bool) -> bool {
    a == b || (ignore_case && a.to_lowercase().eq(b.to_lowercase()))
}
