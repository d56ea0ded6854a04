use super::{AuthEvent, Listener};
use crate::AuthLogError;

/// Holds the listeners an application wants to run for each event.
///
/// The registry is an ordinary value owned by the application; build it once
/// at startup and share it (for example behind an `Arc`) with the code that
/// raises events.
#[derive(Default)]
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener to receive events.
    ///
    /// Listeners are called in the order they are registered.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Dispatch an event to all registered listeners, inline.
    ///
    /// Stops at the first listener that fails and returns its error; later
    /// listeners do not see the event. With no listeners this is a no-op.
    pub async fn dispatch(&self, event: &AuthEvent) -> Result<(), AuthLogError> {
        for listener in &self.listeners {
            listener.handle(event).await?;
        }
        Ok(())
    }
}
