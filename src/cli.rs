//! Command-line interface definitions and parsing
//!
//! `lista` reads lines from a file or stdin, lets the user narrow them in a
//! prompt drawn on the terminal, and writes the narrowed lines back out.
//!
//! # Examples
//!
//! ```bash
//! # Narrow the output of a command
//! ps aux | lista
//!
//! # Start with a query and use the fuzzy matcher
//! lista notes.txt -q "todo" -m fuzzy
//!
//! # Start from the word under line 12, column 4
//! lista src/main.rs -l 12:4 --word
//!
//! # Print the whole session outcome as JSON
//! lista notes.txt --json
//! ```

use crate::config::ConfigOverrides;
use crate::narrow::InitialQuery;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "lista")]
#[command(about = "Narrow a list of lines interactively", long_about = None)]
#[command(version)]
pub struct Cli {
    /// File to narrow (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Initial query
    #[arg(short = 'q', long = "query", value_name = "QUERY", conflicts_with = "word")]
    pub query: Option<String>,

    /// Start with the word under the cursor as the query
    #[arg(short = 'w', long = "word")]
    pub word: bool,

    /// Matcher to use (overrides config)
    #[arg(short = 'm', long = "matcher", value_name = "NAME", value_parser = ["and", "fuzzy"])]
    pub matcher: Option<String>,

    /// Case mode (overrides config)
    #[arg(short = 'c', long = "case", value_name = "MODE", value_parser = ["normal", "ignore", "smart"])]
    pub case: Option<String>,

    /// Prompt label (overrides config)
    #[arg(short = 'p', long = "prefix", value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Do not highlight matched text
    #[arg(long = "no-highlight")]
    pub no_highlight: bool,

    /// Starting cursor position as ROW or ROW:COL (1-based row, 0-based column)
    #[arg(short = 'l', long = "line", value_name = "ROW[:COL]", value_parser = parse_position)]
    pub line: Option<(usize, usize)>,

    /// Write the resulting lines to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the session outcome as JSON instead of the lines
    #[arg(long = "json")]
    pub json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long = "print-config")]
    pub print_config: bool,

    /// Suppress informational output (only print results)
    #[arg(long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Configuration values given on the command line
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            prefix: self.prefix.clone(),
            matcher: self.matcher.clone(),
            case: self.case.clone(),
            highlight: self.no_highlight.then_some(false),
        }
    }

    /// How the prompt's query starts out
    #[must_use]
    pub fn initial_query(&self) -> InitialQuery {
        match (&self.query, self.word) {
            (Some(query), _) => InitialQuery::Text(query.clone()),
            (None, true) => InitialQuery::CursorWord,
            (None, false) => InitialQuery::Empty,
        }
    }
}

fn parse_position(s: &str) -> Result<(usize, usize), String> {
    let (row, col) = s.split_once(':').unwrap_or((s, "0"));
    let row: usize = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row '{row}'"))?;
    if row == 0 {
        return Err("rows start at 1".to_string());
    }
    let col: usize = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column '{col}'"))?;
    Ok((row, col))
}

/// Print an informational line on stderr unless `quiet`
pub fn status(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{} {message}", "✓".green());
    }
}

/// Print an error line on stderr
pub fn error(message: &str) {
    eprintln!("{} {message}", "❌".red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["lista"]);
        assert_eq!(cli.file, None);
        assert_eq!(cli.initial_query(), InitialQuery::Empty);
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_query_and_overrides() {
        let cli = Cli::parse_from([
            "lista", "notes.txt", "-q", "foo bar", "-m", "fuzzy", "-c", "smart", "--no-highlight",
        ]);
        assert_eq!(cli.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(cli.initial_query(), InitialQuery::Text("foo bar".to_string()));

        let overrides = cli.overrides();
        assert_eq!(overrides.matcher.as_deref(), Some("fuzzy"));
        assert_eq!(overrides.case.as_deref(), Some("smart"));
        assert_eq!(overrides.highlight, Some(false));
        assert_eq!(overrides.prefix, None);
    }

    #[test]
    fn test_word_flag() {
        let cli = Cli::parse_from(["lista", "-w", "-l", "3:7"]);
        assert_eq!(cli.initial_query(), InitialQuery::CursorWord);
        assert_eq!(cli.line, Some((3, 7)));
    }

    #[test]
    fn test_query_conflicts_with_word() {
        assert!(Cli::try_parse_from(["lista", "-q", "x", "-w"]).is_err());
    }

    #[test]
    fn test_unknown_matcher_rejected() {
        assert!(Cli::try_parse_from(["lista", "-m", "regex"]).is_err());
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("5"), Ok((5, 0)));
        assert_eq!(parse_position("5:2"), Ok((5, 2)));
        assert!(parse_position("0").is_err());
        assert!(parse_position("a:1").is_err());
        assert!(parse_position("2:b").is_err());
    }
}
