//! Entry point tying host, guard and prompt together
//!
//! [`Lista::run`] is the whole narrowing operation:
//!
//! 1. read the host's content and cursor,
//! 2. snapshot the guarded properties and switch them to session values,
//! 3. run the prompt session until it is confirmed or cancelled,
//! 4. write the narrowed content and the cursor back to the host,
//! 5. restore the guarded properties.
//!
//! Step 5 runs on every path out of steps 2 to 4, including errors.

use crate::config::{ListaConfig, SessionOptions};
use crate::engine::Line;
use crate::guard::StateGuard;
use crate::host::{CursorPosition, Host, PropertyName, PropertyValue, Viewport};
use crate::prompt::{Keymap, PromptSession, Query, SessionResult};
use crate::ui::{EventSource, Renderer};
use crate::{ListaError, Result};
use regex::Regex;
use tracing::{debug, info};

/// Label the host's file type is switched to while narrowing
pub const SESSION_FILETYPE: &str = "lista";

/// Default pattern for the word under the cursor
pub const DEFAULT_WORD_PATTERN: &str = r"\w+";

/// How the query starts out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InitialQuery {
    #[default]
    Empty,
    /// A caller-supplied query
    Text(String),
    /// The word under (or after) the host cursor
    CursorWord,
}

/// Pattern describing a word, compared by its source text
#[derive(Debug, Clone)]
pub struct WordPattern(Regex);

impl WordPattern {
    /// Compile `pattern`
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::InvalidConfiguration`] if the pattern does not
    /// compile.
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern).map(Self).map_err(|e| {
            ListaError::InvalidConfiguration(format!("invalid word pattern '{pattern}': {e}"))
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The word covering byte `col` of `line`, or else the first word after it
    #[must_use]
    pub fn word_at<'a>(&self, line: &'a str, col: usize) -> Option<&'a str> {
        self.0
            .find_iter(line)
            .find(|m| m.end() > col)
            .map(|m| m.as_str())
    }
}

impl PartialEq for WordPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for WordPattern {}

/// Interactive narrowing of a host's lines
#[derive(Debug, Clone)]
pub struct Lista {
    options: SessionOptions,
    initial: InitialQuery,
}

impl Lista {
    #[must_use]
    pub const fn new(options: SessionOptions) -> Self {
        Self {
            options,
            initial: InitialQuery::Empty,
        }
    }

    /// Validate `config` and build an entry from it
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::InvalidConfiguration`] for any rejected value.
    pub fn from_config(config: &ListaConfig) -> Result<Self> {
        Ok(Self::new(config.validate()?))
    }

    #[must_use]
    pub fn with_initial_query(mut self, initial: InitialQuery) -> Self {
        self.initial = initial;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &SessionOptions {
        &self.options
    }

    #[must_use]
    pub const fn keymap(&self) -> &Keymap {
        &self.options.keymap
    }

    /// Narrow `host` interactively
    ///
    /// Content is written only when the session confirmed a view that differs
    /// from the original. The cursor goes to the selected line, or back to
    /// where it was.
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::Host`] if the host rejects a property write, and
    /// propagates event source and renderer errors. The guarded properties
    /// have been restored by the time any error is returned.
    pub fn run<H, E, R>(&self, host: &mut H, events: &mut E, renderer: &mut R) -> Result<SessionResult>
    where
        H: Host + ?Sized,
        E: EventSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let origin = host.cursor();
        let content = host.content();
        let query = self.initial_query(&content, origin);

        info!(
            lines = content.len(),
            row = origin.row,
            guarded = self.options.guard.len(),
            "narrowing started"
        );

        StateGuard::scope(host, &self.options.guard, |host| {
            enter_session_mode(host, &self.options.guard)?;

            let session = PromptSession::new(Line::number_all(content), self.options.matcher, origin.row)
                .with_prefix(self.options.prefix.as_str())
                .with_highlighter(self.options.highlighter)
                .with_query(query);

            let result = session.run(events, renderer)?;
            commit(host, &result, origin);
            Ok(result)
        })
    }

    fn initial_query(&self, content: &[String], origin: CursorPosition) -> Query {
        match &self.initial {
            InitialQuery::Empty => Query::default(),
            InitialQuery::Text(text) => Query::new(text.as_str()),
            InitialQuery::CursorWord => {
                let word = origin
                    .row
                    .checked_sub(1)
                    .and_then(|i| content.get(i))
                    .and_then(|line| self.options.word.word_at(line, origin.col))
                    .unwrap_or_default();
                debug!(word, "initial query from cursor word");
                Query::new(word)
            }
        }
    }
}

/// Value a guarded property holds while the prompt is active
#[must_use]
pub fn session_value(name: PropertyName) -> PropertyValue {
    match name {
        PropertyName::CursorLine => PropertyValue::Flag(true),
        PropertyName::FileType => PropertyValue::Label(SESSION_FILETYPE.to_string()),
        PropertyName::UndoLevels => PropertyValue::Level(-1),
        PropertyName::Viewport => PropertyValue::Viewport(Viewport::default()),
    }
}

/// Switch the guarded properties to their session values
fn enter_session_mode<H: Host + ?Sized>(host: &mut H, guarded: &[PropertyName]) -> Result<()> {
    for &name in guarded {
        host.set_property(name, session_value(name))?;
    }
    Ok(())
}

/// Write the session's outcome to the host
fn commit<H: Host + ?Sized>(host: &mut H, result: &SessionResult, origin: CursorPosition) {
    if result.committed {
        host.set_content(result.final_content.clone());
        let row = result.selected_row.map_or(1, |row| row + 1);
        host.set_cursor(CursorPosition::new(row, 0));
    } else if result.cursor_original_row == origin.row {
        host.set_cursor(origin);
    } else {
        host.set_cursor(CursorPosition::new(result.cursor_original_row, 0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BufferHost;
    use crate::prompt::{Action, InputEvent, Status};
    use crate::testing::{
        FailingRenderer, RecordingRenderer, RejectingHost, ScriptedEvents, default_lista,
    };

    fn accept() -> InputEvent {
        InputEvent::Action(Action::Accept)
    }

    fn cancel() -> InputEvent {
        InputEvent::Action(Action::Cancel)
    }

    #[test]
    fn test_cancel_leaves_host_untouched() {
        let mut host = BufferHost::from_lines(&["a", "b", "c"]).with_cursor(3, 0);
        let before = host.clone();
        let mut events = ScriptedEvents::typing("b", [cancel()]);

        let result = default_lista()
            .run(&mut host, &mut events, &mut RecordingRenderer::default())
            .unwrap();

        assert_eq!(result.status, Status::Cancelled);
        assert!(!result.committed);
        assert_eq!(host.lines(), &["a", "b", "c"]);
        assert_eq!(host.content_writes(), 0);
        assert_eq!(host.cursor(), CursorPosition::new(3, 0));
        assert_eq!(host, before);
    }

    #[test]
    fn test_confirm_writes_narrowed_content() {
        let mut host = BufferHost::from_lines(&["alpha", "beta", "gamma"]);
        let mut events = ScriptedEvents::typing("ga", [accept()]);

        let result = default_lista()
            .run(&mut host, &mut events, &mut RecordingRenderer::default())
            .unwrap();

        assert!(result.committed);
        assert_eq!(result.cursor_original_row, 3);
        assert_eq!(host.lines(), &["gamma"]);
        assert_eq!(host.cursor(), CursorPosition::new(1, 0));
        assert_eq!(host.content_writes(), 1);
    }

    #[test]
    fn test_confirm_without_narrowing_moves_cursor_only() {
        let mut host = BufferHost::from_lines(&["alpha", "beta", "gamma"]);
        let mut events = ScriptedEvents::new([
            InputEvent::Action(Action::SelectNext),
            accept(),
        ]);

        let result = default_lista()
            .run(&mut host, &mut events, &mut RecordingRenderer::default())
            .unwrap();

        assert!(!result.committed);
        assert_eq!(host.content_writes(), 0);
        assert_eq!(host.cursor().row, 2);
    }

    #[test]
    fn test_properties_switched_during_session_and_restored() {
        let mut host = BufferHost::from_lines(&["x"]).with_filetype("rust");
        let before: Vec<PropertyValue> =
            PropertyName::ALL.iter().map(|&n| host.property(n)).collect();

        let mut events = ScriptedEvents::new([cancel()]);
        default_lista()
            .run(&mut host, &mut events, &mut RecordingRenderer::default())
            .unwrap();

        let after: Vec<PropertyValue> =
            PropertyName::ALL.iter().map(|&n| host.property(n)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_session_values_are_visible_inside_the_session() {
        let mut host = RejectingHost::new(BufferHost::from_lines(&["x"]), None);
        let mut events = ScriptedEvents::new([cancel()]);
        default_lista()
            .run(&mut host, &mut events, &mut RecordingRenderer::default())
            .unwrap();

        let writes = host.writes();
        assert_eq!(writes[0], (PropertyName::CursorLine, PropertyValue::Flag(true)));
        assert_eq!(
            writes[1],
            (PropertyName::FileType, PropertyValue::Label("lista".to_string()))
        );
        assert_eq!(writes.len(), 8);
        assert_eq!(host.inner().property(PropertyName::CursorLine), PropertyValue::Flag(false));
    }

    #[test]
    fn test_render_failure_restores_guard() {
        let mut host = BufferHost::from_lines(&["a", "b"]).with_filetype("text");
        let before = host.clone();
        let mut events = ScriptedEvents::new([accept()]);

        let err = default_lista()
            .run(&mut host, &mut events, &mut FailingRenderer)
            .unwrap_err();

        assert!(matches!(err, ListaError::UiError(_)));
        assert_eq!(host, before);
    }

    #[test]
    fn test_closed_input_restores_guard() {
        let mut host = BufferHost::from_lines(&["a", "b"]).with_filetype("text");
        let before = host.clone();
        let mut events = ScriptedEvents::new([InputEvent::Insert('a')]);

        let err = default_lista()
            .run(&mut host, &mut events, &mut RecordingRenderer::default())
            .unwrap_err();

        assert!(matches!(err, ListaError::InputClosed));
        assert_eq!(host, before);
    }

    #[test]
    fn test_rejected_session_write_is_an_error_and_restores() {
        let inner = BufferHost::from_lines(&["a"]).with_filetype("text");
        let mut host = RejectingHost::new(inner.clone(), Some(PropertyName::UndoLevels));
        let mut events = ScriptedEvents::new([accept()]);

        let err = default_lista()
            .run(&mut host, &mut events, &mut RecordingRenderer::default())
            .unwrap_err();

        assert!(matches!(err, ListaError::Host(_)));
        assert_eq!(host.inner(), &inner);
        assert_eq!(events.remaining(), 1);
    }

    #[test]
    fn test_only_listed_properties_are_touched() {
        let config = ListaConfig {
            guard: vec!["filetype".to_string()],
            ..ListaConfig::default()
        };
        let lista = Lista::from_config(&config).unwrap();
        let mut host = RejectingHost::new(BufferHost::from_lines(&["a"]), None);
        let mut events = ScriptedEvents::new([cancel()]);

        lista
            .run(&mut host, &mut events, &mut RecordingRenderer::default())
            .unwrap();

        assert!(host.writes().iter().all(|(name, _)| *name == PropertyName::FileType));
        assert_eq!(host.writes().len(), 2);
    }

    #[test]
    fn test_initial_query_text() {
        let mut host = BufferHost::from_lines(&["alpha", "beta", "gamma"]);
        let mut events = ScriptedEvents::new([accept()]);
        let mut renderer = RecordingRenderer::default();

        let result = default_lista()
            .with_initial_query(InitialQuery::Text("ga".to_string()))
            .run(&mut host, &mut events, &mut renderer)
            .unwrap();

        assert_eq!(renderer.frames[0].query, "ga");
        assert_eq!(renderer.frames[0].caret, 2);
        assert_eq!(result.final_content, vec!["gamma"]);
    }

    #[test]
    fn test_initial_query_from_cursor_word() {
        let mut host =
            BufferHost::from_lines(&["fn main() {", "    let answer = 42;", "}"]).with_cursor(2, 9);
        let mut events = ScriptedEvents::new([cancel()]);
        let mut renderer = RecordingRenderer::default();

        default_lista()
            .with_initial_query(InitialQuery::CursorWord)
            .run(&mut host, &mut events, &mut renderer)
            .unwrap();

        assert_eq!(renderer.frames[0].query, "answer");
        assert_eq!(renderer.frames[0].selected, Some(0));
    }

    #[test]
    fn test_word_at() {
        let word = WordPattern::new(DEFAULT_WORD_PATTERN).unwrap();
        assert_eq!(word.word_at("foo bar", 0), Some("foo"));
        assert_eq!(word.word_at("foo bar", 2), Some("foo"));
        assert_eq!(word.word_at("foo bar", 3), Some("bar"));
        assert_eq!(word.word_at("foo bar", 7), None);
        assert_eq!(word.word_at("", 0), None);
    }

    #[test]
    fn test_invalid_word_pattern() {
        assert!(matches!(
            WordPattern::new("(unclosed"),
            Err(ListaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_invalid_configuration_touches_nothing() {
        let config = ListaConfig {
            matcher: "regex".to_string(),
            ..ListaConfig::default()
        };
        assert!(matches!(
            Lista::from_config(&config),
            Err(ListaError::InvalidConfiguration(_))
        ));
    }
}
