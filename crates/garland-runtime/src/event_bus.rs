//! Event bus for broadcasting tree events

use crate::event::TreeEvent;

/// A simple event queue that systems push to and consumers drain
pub struct EventBus {
    events: Vec<TreeEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: TreeEvent) {
        self.events.push(event);
    }

    /// Push an event if there is one (e.g. from a signal that may not have changed)
    pub fn push_some(&mut self, event: Option<TreeEvent>) {
        if let Some(event) = event {
            self.events.push(event);
        }
    }

    /// Pending events, without draining
    pub fn pending(&self) -> &[TreeEvent] {
        &self.events
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<TreeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
