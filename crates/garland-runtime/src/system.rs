//! Runtime system trait

use crate::event::TreeEvent;
use garland_core::Result;

/// Per-frame inputs handed to every system
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub delta: f32,
    /// Seconds since the visualization started
    pub elapsed: f32,
    /// Current value of the assembled flag
    pub assembled: bool,
    /// Transitions raised since the previous frame
    pub events: &'a [TreeEvent],
}

/// A system that can be ticked by the frame loop
///
/// Systems are updated in registration order, once per rendered frame.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()>;

    /// Called when the visualization is torn down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
