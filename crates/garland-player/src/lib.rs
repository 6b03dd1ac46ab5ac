//! Garland Player — the tree application library
//!
//! Wires the particle store, the particle and audio systems, and the
//! assembled/music inputs into `TreeApp`, configured by `GarlandConfig`.

pub mod app;
pub mod config;

pub use app::{FrameReport, TreeApp};
pub use config::{AnimationConfig, ConfigLayer, GarlandConfig};
