//! Terminal mode handling
//!
//! The prompt draws on stderr so stdout stays free for the narrowed output.

use crate::ui::error::{Result, UiError};
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr};
use tracing::warn;

/// Raw mode and the alternate screen, held for the guard's lifetime
///
/// Dropping the guard restores the terminal; [`TerminalGuard::leave`] does the
/// same and reports failures.
#[derive(Debug)]
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Setup terminal for TUI
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be entered.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stderr(), EnterAlternateScreen, cursor::Hide) {
            return Err(abandon_setup(e, disable_raw_mode()));
        }
        Ok(Self { active: true })
    }

    /// Build a ratatui terminal drawing on stderr
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be read.
    pub fn terminal(&self) -> Result<Terminal<CrosstermBackend<Stderr>>> {
        Terminal::new(CrosstermBackend::new(io::stderr())).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal could not be restored.
    pub fn leave(mut self) -> Result<()> {
        self.active = false;
        restore()
    }

    /// Leave the terminal, then hand back `outcome`
    ///
    /// An error in `outcome` takes precedence over a cleanup error; the
    /// latter is logged in that case.
    ///
    /// # Errors
    ///
    /// Returns the error in `outcome`, or the cleanup error if `outcome`
    /// succeeded.
    pub fn finish<T>(self, outcome: crate::Result<T>) -> crate::Result<T> {
        settle(outcome, self.leave())
    }
}

/// Setup error to report once raw mode has been switched back off
fn abandon_setup(setup: io::Error, cleanup: io::Result<()>) -> UiError {
    if let Err(e) = cleanup {
        warn!(error = %e, "failed to leave raw mode after setup error");
    }
    setup.into()
}

fn settle<T>(outcome: crate::Result<T>, cleanup: Result<()>) -> crate::Result<T> {
    match (outcome, cleanup) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup_err)) => {
            warn!(error = %cleanup_err, "terminal cleanup failed after session error");
            Err(e)
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active
            && let Err(e) = restore()
        {
            warn!(error = %e, "terminal cleanup failed");
        }
    }
}

fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stderr(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}
