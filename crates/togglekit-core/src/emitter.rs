//! Composition-based event emission.
//!
//! A widget owns an [`Emitter`] per event type instead of inheriting
//! emission behavior. Handlers stay registered until removed with
//! [`Emitter::off`] or the emitter is cleared during teardown.

use std::fmt;

/// Identifier for a registered handler, used to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<T> = Box<dyn FnMut(&T) + Send + Sync>;

/// A minimal publish/subscribe channel for one event type.
pub struct Emitter<T> {
    handlers: Vec<(HandlerId, Handler<T>)>,
    next_id: u64,
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("handler_count", &self.handlers.len())
            .finish()
    }
}

impl<T> Emitter<T> {
    /// Create an emitter with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; returns an id for later removal.
    pub fn on<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&T) + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns whether it was registered.
    pub fn off(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    /// Deliver a payload to every registered handler, in registration order.
    pub fn emit(&mut self, payload: &T) {
        for (_, handler) in &mut self.handlers {
            handler(payload);
        }
    }

    /// Remove all handlers.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}
