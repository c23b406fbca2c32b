//! UI abstraction layer
//!
//! The prompt session talks to its front end through two traits, so the same
//! session logic runs against a real terminal or a scripted test double.
//!
//! # Core Traits
//!
//! - **`EventSource`** - Produces prompt input events
//! - **`Renderer`** - Draws a [`PromptFrame`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      PromptSession                      │
//! │   (query, refilter, selection)          │
//! └────────────────┬────────────────────────┘
//!                  │ Uses traits
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      UI Trait Abstraction               │
//! │  (EventSource, Renderer)                │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ Test doubles  │  │ TUI Adapter       │
//! │ - Scripted    │  │ - TerminalEvents  │
//! │ - Recording   │  │ - RatatuiRenderer │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! ## Implementing a Custom Front End
//!
//! ```no_run
//! use lista::prompt::{Action, InputEvent};
//! use lista::ui::{EventSource, PromptFrame, Renderer};
//!
//! struct AcceptImmediately;
//!
//! impl EventSource for AcceptImmediately {
//!     fn next_event(&mut self) -> lista::Result<InputEvent> {
//!         Ok(InputEvent::Action(Action::Accept))
//!     }
//! }
//!
//! struct PrintQuery;
//!
//! impl Renderer for PrintQuery {
//!     fn render(&mut self, frame: &PromptFrame<'_>) -> lista::Result<()> {
//!         println!("{}{} ({} rows)", frame.prefix, frame.query.text(), frame.view.len());
//!         Ok(())
//!     }
//! }
//! ```

mod error;
mod traits;

pub mod ratatui_adapter;

#[cfg(test)]
pub mod mock;

pub use error::{Result, UiError};
pub use traits::{EventSource, PromptFrame, Renderer};
