//! Configuration module for lista
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! the user's `config.toml`, and command-line overrides. The merged
//! [`ListaConfig`] is then validated into typed [`SessionOptions`]; nothing
//! touches the host before validation has succeeded.

use crate::guard::parse_names;
use crate::highlight::Highlighter;
use crate::host::PropertyName;
use crate::matcher::{CaseMode, Matcher, MatcherKind};
use crate::narrow::{DEFAULT_WORD_PATTERN, WordPattern};
use crate::prompt::Keymap;
use crate::{ListaError, Result};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default prompt label
pub const DEFAULT_PREFIX: &str = "# ";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ListaConfig {
    /// Label shown before the query
    pub prefix: String,

    /// Matcher name: `and` or `fuzzy`
    pub matcher: String,

    /// Case mode: `normal`, `ignore` or `smart`
    pub case: String,

    /// Highlight matched ranges
    pub highlight: bool,

    /// Host properties saved before the session and restored after it
    pub guard: Vec<String>,

    /// Regular expression for the word under the cursor
    pub word_pattern: String,

    /// Key expression to action name; `"none"` removes a default binding
    pub keymap: BTreeMap<String, String>,
}

impl Default for ListaConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            matcher: MatcherKind::default().to_string(),
            case: CaseMode::default().to_string(),
            highlight: true,
            guard: PropertyName::ALL.iter().map(ToString::to_string).collect(),
            word_pattern: DEFAULT_WORD_PATTERN.to_string(),
            keymap: BTreeMap::new(),
        }
    }
}

/// Values given on the command line, each replacing the configured one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub prefix: Option<String>,
    pub matcher: Option<String>,
    pub case: Option<String>,
    pub highlight: Option<bool>,
}

/// Validated, typed session options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub prefix: String,
    pub matcher: Matcher,
    pub highlighter: Highlighter,
    pub guard: Vec<PropertyName>,
    pub word: WordPattern,
    pub keymap: Keymap,
}

impl ListaConfig {
    /// Get the path to the user config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> std::result::Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("lista").join("config.toml"))
    }

    /// Load configuration and apply command-line overrides
    ///
    /// With `path` the file must exist. Without it the user config file is
    /// read if present and skipped otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::ConfigError`] if a file cannot be read or parsed.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => match Self::config_path() {
                Ok(default) => File::from(default).format(FileFormat::Toml).required(false),
                Err(e) => {
                    debug!(error = %e, "no config directory, using defaults");
                    return Ok(Self::default().with_overrides(overrides));
                }
            },
        };

        let settings = Config::builder()
            .add_source(file)
            .set_override_option("prefix", overrides.prefix.clone())?
            .set_override_option("matcher", overrides.matcher.clone())?
            .set_override_option("case", overrides.case.clone())?
            .set_override_option("highlight", overrides.highlight)?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Apply overrides without going through a config source
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(prefix) = &overrides.prefix {
            self.prefix.clone_from(prefix);
        }
        if let Some(matcher) = &overrides.matcher {
            self.matcher.clone_from(matcher);
        }
        if let Some(case) = &overrides.case {
            self.case.clone_from(case);
        }
        if let Some(highlight) = overrides.highlight {
            self.highlight = highlight;
        }
        self
    }

    /// Check every value and build typed options
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::InvalidConfiguration`] for an unknown matcher,
    /// case mode, guarded property, key or action, or a word pattern that
    /// does not compile.
    pub fn validate(&self) -> Result<SessionOptions> {
        let kind: MatcherKind = self.matcher.parse()?;
        let case: CaseMode = self.case.parse()?;
        let guard = parse_names(&self.guard).map_err(|e| match e {
            ListaError::UnsupportedProperty(name) => {
                ListaError::InvalidConfiguration(format!("unknown guarded property '{name}'"))
            }
            other => other,
        })?;
        let word = WordPattern::new(&self.word_pattern)?;
        let keymap = Keymap::default().with_overrides(&self.keymap)?;

        Ok(SessionOptions {
            prefix: self.prefix.clone(),
            matcher: Matcher::new(kind, case),
            highlighter: Highlighter::new(self.highlight),
            guard,
            word,
            keymap,
        })
    }

    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be serialized.
    pub fn to_toml(&self) -> std::result::Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}
