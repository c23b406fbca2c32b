//! Testing utilities for lista
//!
//! Scripted front ends, a host that records and optionally rejects property
//! writes, and a ready-made entry with default options.
//!
//! Only available when compiled with `cfg(test)`.

use crate::config::ListaConfig;
use crate::host::{BufferHost, CursorPosition, Host, PropertyName, PropertyValue};
use crate::narrow::Lista;
use crate::{ListaError, Result};

pub use crate::ui::mock::{FailingRenderer, RecordedFrame, RecordingRenderer, ScriptedEvents};

/// Entry built from the default configuration
///
/// # Panics
/// Panics if the default configuration does not validate.
#[must_use]
pub fn default_lista() -> Lista {
    Lista::from_config(&ListaConfig::default()).expect("default configuration should validate")
}

/// Host wrapper that logs every property write and refuses writes to one
/// property
#[derive(Debug, Clone)]
pub struct RejectingHost {
    inner: BufferHost,
    reject: Option<PropertyName>,
    writes: Vec<(PropertyName, PropertyValue)>,
}

impl RejectingHost {
    #[must_use]
    pub const fn new(inner: BufferHost, reject: Option<PropertyName>) -> Self {
        Self {
            inner,
            reject,
            writes: Vec::new(),
        }
    }

    /// Accepted property writes, in order
    #[must_use]
    pub fn writes(&self) -> &[(PropertyName, PropertyValue)] {
        &self.writes
    }

    #[must_use]
    pub const fn inner(&self) -> &BufferHost {
        &self.inner
    }
}

impl Host for RejectingHost {
    fn content(&self) -> Vec<String> {
        self.inner.content()
    }

    fn set_content(&mut self, lines: Vec<String>) {
        self.inner.set_content(lines);
    }

    fn cursor(&self) -> CursorPosition {
        self.inner.cursor()
    }

    fn set_cursor(&mut self, position: CursorPosition) {
        self.inner.set_cursor(position);
    }

    fn property(&self, name: PropertyName) -> PropertyValue {
        self.inner.property(name)
    }

    fn set_property(&mut self, name: PropertyName, value: PropertyValue) -> Result<()> {
        if self.reject == Some(name) {
            return Err(ListaError::Host(format!("{name} is read-only")));
        }
        self.inner.set_property(name, value.clone())?;
        self.writes.push((name, value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejecting_host_records_accepted_writes() {
        let mut host = RejectingHost::new(
            BufferHost::from_lines(&["a"]),
            Some(PropertyName::UndoLevels),
        );

        host.set_property(PropertyName::CursorLine, PropertyValue::Flag(true))
            .unwrap();
        let err = host
            .set_property(PropertyName::UndoLevels, PropertyValue::Level(-1))
            .unwrap_err();

        assert!(matches!(err, ListaError::Host(_)));
        assert_eq!(
            host.writes(),
            &[(PropertyName::CursorLine, PropertyValue::Flag(true))]
        );
        assert_eq!(host.property(PropertyName::UndoLevels), PropertyValue::Level(1000));
    }
}
