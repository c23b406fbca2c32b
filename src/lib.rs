//! Lista - interactive incremental narrowing of a list of lines
//!
//! This library filters a host's lines against a query typed one key at a
//! time, maps the narrowed rows back to their original positions, and commits
//! the result to the host while guaranteeing that the host's display state is
//! restored afterwards.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod engine;
pub mod guard;
pub mod highlight;
pub mod host;
pub mod matcher;
pub mod narrow;
pub mod prompt;
pub mod ui;

#[cfg(test)]
pub mod testing;

pub use config::{ConfigOverrides, ListaConfig, SessionOptions};
pub use engine::{FilteredRow, FilteredView, IndexMap, Line};
pub use guard::{GuardSnapshot, StateGuard};
pub use host::{BufferHost, CursorPosition, Host, PropertyName, PropertyValue, Viewport};
pub use matcher::{CaseMode, MatchOutcome, Matcher, MatcherKind, Span};
pub use narrow::{InitialQuery, Lista};
pub use prompt::{
    Action, InputEvent, Key, Keymap, PromptSession, Query, SessionResult, Status,
};
pub use ui::{EventSource, PromptFrame, Renderer};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ListaError {
    /// An option value was rejected before the session started
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The state guard was asked for a property it does not know
    #[error("Unsupported property: {0}")]
    UnsupportedProperty(String),
    /// The host refused to apply a value
    #[error("Host error: {0}")]
    Host(String),
    /// The input stream ended while the prompt was still active
    #[error("Input closed before the prompt finished")]
    InputClosed,
    /// Terminal front end error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents a configuration loading error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for lista operations
pub type Result<T> = std::result::Result<T, ListaError>;
