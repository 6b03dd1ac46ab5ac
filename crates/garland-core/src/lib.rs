//! Garland Core - Foundational types for the Garland tree visualization
//!
//! This crate provides the core types that all other Garland crates depend on:
//! - `Vec3`, `Euler` - Spatial types
//! - `Color` - Linear-space RGB(A) color with sRGB conversion
//! - Error types and Result alias

mod error;
mod types;

pub use error::{GarlandError, Result};
pub use types::{lerp, Color, Euler, Vec3};
