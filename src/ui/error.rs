//! UI error types

use thiserror::Error;

/// Errors that can occur in the terminal front end
#[derive(Debug, Error)]
pub enum UiError {
    /// The terminal backend failed to draw or report its size
    #[error("Terminal error: {0}")]
    TerminalError(String),

    /// IO error during UI operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
