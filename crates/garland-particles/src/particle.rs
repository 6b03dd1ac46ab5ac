//! The particle record shared by generation and rendering

use crate::palette::Swatch;
use garland_core::{Color, Euler, Vec3};
use serde::{Deserialize, Serialize};

/// One instanced decorative element. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position in the scattered cloud
    pub start_position: Vec3,
    /// Position on the assembled cone
    pub target_position: Vec3,
    /// Base orientation (radians, XYZ order)
    pub rotation: Euler,
    /// Baseline size multiplier, always positive
    pub scale: f32,
    pub swatch: Swatch,
}

impl Particle {
    /// Linear-space color for this particle
    pub fn color(&self) -> Color {
        self.swatch.color()
    }

    /// Position blended between scattered (0) and assembled (1)
    pub fn position_at(&self, blend: f32) -> Vec3 {
        self.start_position.lerp(&self.target_position, blend)
    }

    pub fn is_valid(&self) -> bool {
        self.start_position.is_finite()
            && self.target_position.is_finite()
            && self.scale.is_finite()
            && self.scale > 0.0
    }
}
