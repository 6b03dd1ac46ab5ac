//! The externally owned assembled flag

use crate::event::TreeEvent;

/// Holds the assembled boolean and reports transitions.
///
/// Setting the same value again produces no event, so consumers that react to
/// events (the audio cues) fire exactly once per flip.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssembledSignal {
    value: bool,
}

impl AssembledSignal {
    pub fn new(initial: bool) -> Self {
        Self { value: initial }
    }

    pub fn get(&self) -> bool {
        self.value
    }

    /// Set the flag; returns an event only if the value changed
    pub fn set(&mut self, value: bool) -> Option<TreeEvent> {
        if self.value == value {
            return None;
        }
        self.value = value;
        Some(TreeEvent::AssembledChanged { assembled: value })
    }

    /// Flip the flag; always returns the transition event
    pub fn toggle(&mut self) -> TreeEvent {
        self.value = !self.value;
        TreeEvent::AssembledChanged {
            assembled: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_value_emits_nothing() {
        let mut signal = AssembledSignal::new(false);
        assert_eq!(signal.set(false), None);
        assert_eq!(signal.set(false), None);
        assert!(!signal.get());
    }

    #[test]
    fn each_transition_emits_once() {
        let mut signal = AssembledSignal::default();
        assert_eq!(
            signal.set(true),
            Some(TreeEvent::AssembledChanged { assembled: true })
        );
        assert_eq!(signal.set(true), None);
        assert_eq!(
            signal.set(false),
            Some(TreeEvent::AssembledChanged { assembled: false })
        );
    }

    #[test]
    fn toggle_flips() {
        let mut signal = AssembledSignal::new(true);
        assert_eq!(
            signal.toggle(),
            TreeEvent::AssembledChanged { assembled: false }
        );
        assert!(!signal.get());
    }
}
