//! Animation driver for the Garland tree
//!
//! The whole tree shares one scalar `progress` in [0, 1] that moves toward
//! 1 while assembled and toward 0 while scattered, at a fixed rate. The
//! renderer consumes the eased form of that progress as its blend factor.
//!
//! - `easing` — pure easing curves
//! - `driver` — `AssemblyProgress` state value and the per-frame `AnimationDriver`

pub mod driver;
pub mod easing;

pub use driver::{AnimationDriver, AssemblyPhase, AssemblyProgress, ANIMATION_SPEED};
pub use easing::{ease_cubic_in_out, Easing};
