//! Garland Runtime - Frame loop infrastructure
//!
//! Provides the building blocks shared by the visual and audio systems:
//! - `FrameClock` — per-frame delta and elapsed time
//! - `TreeEvent` / `EventBus` — typed event queue for inter-system communication
//! - `AssembledSignal` — the externally owned boolean, reporting transitions
//! - `RuntimeSystem` — trait for systems ticked by the frame loop

mod clock;
mod event;
mod event_bus;
mod signal;
mod system;

pub use clock::FrameClock;
pub use event::TreeEvent;
pub use event_bus::EventBus;
pub use signal::AssembledSignal;
pub use system::{FrameContext, RuntimeSystem};
