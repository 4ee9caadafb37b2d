//! Device-scoped synchronous event bus
//!
//! A quirked device owns one bus; cluster instances of that device register
//! as listeners when they are built. Publishing calls every live listener in
//! registration order on the caller's stack.

use std::sync::{Arc, PoisonError, RwLock, Weak};
use zigbee_core::QuirkError;

/// Receiver of bus events
pub trait Listener<E>: Send + Sync {
    fn on_event(&self, event: &E) -> Result<(), QuirkError>;
}

/// Fan-out relay between clusters of one device
pub struct Bus<E> {
    listeners: RwLock<Vec<Weak<dyn Listener<E>>>>,
}

impl<E> Default for Bus<E> {
    fn default() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }
}

impl<E: std::fmt::Debug> Bus<E> {
    #[must_use] pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener without taking ownership of it
    ///
    /// Returns `false` if the listener was already registered.
    pub fn add_listener(&self, listener: Weak<dyn Listener<E>>) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|l| l.strong_count() > 0);
        if listeners.iter().any(|l| Weak::ptr_eq(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Number of live listeners
    #[must_use] pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }

    /// Deliver an event to every live listener, stopping at the first failure
    pub fn publish(&self, event: &E) -> Result<(), QuirkError> {
        // Snapshot so listeners may publish again from inside their handler
        let listeners: Vec<Arc<dyn Listener<E>>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(Weak::upgrade)
            .collect();

        if listeners.is_empty() {
            tracing::trace!("No listeners for {:?}", event);
        }
        for listener in listeners {
            listener.on_event(event)?;
        }
        Ok(())
    }
}

/// Events relayed between the clusters of a scene remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// The remote selected a scene
    ChangeScene(u8),
}

pub type SceneBus = Bus<SceneEvent>;
