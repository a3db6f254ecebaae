// binding.rs — ConnectorBindings: the two connector slots of a node.
//
// A node has a *current* connector, which may be rebound any number of
// times (e.g. when a filtering view wraps the node), and an *original*
// connector, which is set once and never replaced. Two named slots, not a
// chain: only one level of override is ever needed.
//
// The current slot is an RwLock around a whole `Option<ConnectorRef>`, so a
// reader on another thread sees either the old handle or the new one. The
// original slot is a OnceLock, which makes "set at most once" a property of
// the type.

use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::connector::ConnectorRef;

pub struct ConnectorBindings {
    current: RwLock<Option<ConnectorRef>>,
    original: OnceLock<ConnectorRef>,
}

impl ConnectorBindings {
    /// Both slots empty.
    pub fn unbound() -> Self {
        Self {
            current: RwLock::new(None),
            original: OnceLock::new(),
        }
    }

    /// Both slots set to `connector`.
    pub fn bound_to(connector: ConnectorRef) -> Self {
        Self {
            current: RwLock::new(Some(connector.clone())),
            original: OnceLock::from(connector),
        }
    }

    pub fn current(&self) -> Option<ConnectorRef> {
        // The slot holds a plain handle, so a poisoned lock carries no
        // broken invariant and is safe to read through.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current connector, returning the previous one.
    pub fn rebind(&self, connector: ConnectorRef) -> Option<ConnectorRef> {
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        slot.replace(connector)
    }

    pub fn original(&self) -> Option<ConnectorRef> {
        self.original.get().cloned()
    }

    /// Bind the original connector. Fails, handing `connector` back, if an
    /// original is already bound.
    pub fn bind_original(&self, connector: ConnectorRef) -> Result<(), ConnectorRef> {
        self.original.set(connector)
    }
}

impl Default for ConnectorBindings {
    fn default() -> Self {
        Self::unbound()
    }
}

impl Clone for ConnectorBindings {
    fn clone(&self) -> Self {
        Self {
            current: RwLock::new(self.current()),
            original: self.original().map(OnceLock::from).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for ConnectorBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.current();
        let original = self.original();
        f.debug_struct("ConnectorBindings")
            .field("current", &current.as_ref().map(|c| c.connector_id()))
            .field("original", &original.as_ref().map(|c| c.connector_id()))
            .finish()
    }
}
