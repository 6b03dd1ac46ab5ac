//! Events raised by the control surface

use serde::Serialize;

/// A change in one of the visualization's external inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeEvent {
    /// The assembled flag flipped
    AssembledChanged { assembled: bool },
    /// Background music switched on or off
    MusicToggled { playing: bool },
}
