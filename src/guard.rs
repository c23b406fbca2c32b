//! Scoped save/restore of host properties
//!
//! A [`StateGuard`] captures a fixed set of host properties when it is
//! created and writes every one of them back when it is restored or dropped.
//! The session runs against the guard (it dereferences to the host), so every
//! exit path out of the session (normal return, early `?` return, or a
//! panic unwinding through it) passes through the restore.
//!
//! ```
//! use lista::guard::StateGuard;
//! use lista::host::{BufferHost, Host, PropertyName, PropertyValue};
//!
//! let mut host = BufferHost::from_lines(&["a", "b"]).with_filetype("text");
//! {
//!     let mut guard = StateGuard::snapshot(&mut host, &["filetype"]).unwrap();
//!     guard
//!         .set_property(PropertyName::FileType, PropertyValue::Label("lista".into()))
//!         .unwrap();
//! }
//! assert_eq!(host.property(PropertyName::FileType), PropertyValue::Label("text".into()));
//! ```

use crate::host::{Host, PropertyName, PropertyValue};
use crate::Result;
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

/// Property values captured at snapshot time, in capture order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardSnapshot {
    entries: Vec<(PropertyName, PropertyValue)>,
}

impl GuardSnapshot {
    /// Read the current value of each named property
    ///
    /// Duplicate names are captured once, at their first position.
    #[must_use]
    pub fn capture<H: Host + ?Sized>(host: &H, names: &[PropertyName]) -> Self {
        let mut entries: Vec<(PropertyName, PropertyValue)> = Vec::with_capacity(names.len());
        for &name in names {
            if !entries.iter().any(|(seen, _)| *seen == name) {
                entries.push((name, host.property(name)));
            }
        }
        Self { entries }
    }

    /// Captured property names, in capture order
    pub fn names(&self) -> impl Iterator<Item = PropertyName> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every captured value back, in capture order
    ///
    /// A rejected write does not stop the remaining ones; the first failure
    /// is returned once all writes have been attempted.
    fn apply<H: Host + ?Sized>(&self, host: &mut H) -> Result<()> {
        let mut first_error = None;
        for (name, value) in &self.entries {
            if let Err(e) = host.set_property(*name, value.clone()) {
                debug!(property = %name, error = %e, "restore write rejected");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Resolve property names
///
/// # Errors
///
/// Returns [`ListaError::UnsupportedProperty`] for the first name that is not
/// one of the supported properties.
pub fn parse_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<PropertyName>> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// Holds a host borrowed for the length of a session and restores its
/// captured properties when released
pub struct StateGuard<'h, H: Host + ?Sized> {
    host: &'h mut H,
    snapshot: Option<GuardSnapshot>,
}

impl<'h, H: Host + ?Sized> StateGuard<'h, H> {
    /// Capture the named properties of `host`
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::UnsupportedProperty`] if any name is unknown.
    /// Nothing is captured in that case.
    pub fn snapshot<S: AsRef<str>>(host: &'h mut H, names: &[S]) -> Result<Self> {
        let names = parse_names(names)?;
        Ok(Self::with_properties(host, &names))
    }

    /// Capture already-resolved properties of `host`
    pub fn with_properties(host: &'h mut H, names: &[PropertyName]) -> Self {
        let snapshot = GuardSnapshot::capture(&*host, names);
        debug!(properties = snapshot.len(), "host state captured");
        Self {
            host,
            snapshot: Some(snapshot),
        }
    }

    /// Write the captured values back and release the host
    ///
    /// # Errors
    ///
    /// Returns the first property write the host rejected. Every other
    /// captured value has still been written.
    pub fn restore(mut self) -> Result<()> {
        match self.snapshot.take() {
            Some(snapshot) => snapshot.apply(&mut *self.host),
            None => Ok(()),
        }
    }

    /// Run `body` with the properties captured, restoring them afterwards
    ///
    /// The body's error takes precedence over a restore error; the latter is
    /// logged in that case.
    ///
    /// # Errors
    ///
    /// Returns the body's error, or the restore error if the body succeeded.
    pub fn scope<T, F>(host: &'h mut H, names: &[PropertyName], body: F) -> Result<T>
    where
        F: FnOnce(&mut H) -> Result<T>,
    {
        let mut guard = Self::with_properties(host, names);
        let outcome = body(&mut *guard);
        let restored = guard.restore();
        match (outcome, restored) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(restore_err)) => {
                warn!(error = %restore_err, "host state restore failed after session error");
                Err(e)
            }
        }
    }
}

impl<H: Host + ?Sized> Deref for StateGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        &*self.host
    }
}

impl<H: Host + ?Sized> DerefMut for StateGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut *self.host
    }
}

impl<H: Host + ?Sized> Drop for StateGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take()
            && let Err(e) = snapshot.apply(&mut *self.host)
        {
            warn!(error = %e, "host state restore failed");
        }
    }
}
