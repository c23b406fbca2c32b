//! Ratatui-based terminal front end
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  TerminalEvents          RatatuiRenderer    │
//! │  (EventSource)           (Renderer)         │
//! └──────────┬──────────────────────┬───────────┘
//!            ▼                      ▼
//!     ┌────────────┐         ┌───────────┐
//!     │ Crossterm  │         │  Ratatui  │
//!     │  (events)  │         │ (widgets) │
//!     └────────────┘         └───────────┘
//! ```
//!
//! [`TerminalGuard`] owns raw mode and the alternate screen for as long as the
//! prompt is on screen.

mod events;
mod renderer;
mod terminal;
mod theme;
pub mod widgets;

pub use events::{TerminalEvents, translate};
pub use renderer::RatatuiRenderer;
pub use terminal::TerminalGuard;
pub use theme::Theme;

/// Rows of a rendered buffer as plain strings
#[cfg(test)]
pub(crate) fn buffer_lines(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let width = usize::from(buf.area.width.max(1));
    buf.content
        .chunks(width)
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect())
        .collect()
}
