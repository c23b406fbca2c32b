//! The prompt: query editing, key bindings and the session state machine
//!
//! A [`PromptSession`] reads [`InputEvent`]s from an
//! [`EventSource`](crate::ui::EventSource), edits its [`Query`], refilters the
//! original lines and hands a [`PromptFrame`](crate::ui::PromptFrame) to a
//! [`Renderer`](crate::ui::Renderer) after every change. It ends in
//! [`Status::Confirmed`] or [`Status::Cancelled`] and reports a
//! [`SessionResult`].
//!
//! Terminal key presses become input events through a [`Keymap`], which binds
//! [`Key`]s to [`Action`]s.

mod key;
mod keymap;
mod query;
mod session;

pub use key::Key;
pub use keymap::{Action, InputEvent, Keymap};
pub use query::Query;
pub use session::{DEFAULT_PAGE_SIZE, EventResult, PromptSession, SessionResult, Status};
