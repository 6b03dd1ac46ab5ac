//! Particle classes and their tunable generation/render profiles

use crate::palette::Swatch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of particle that make up the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleClass {
    Foliage,
    Ornament,
    Gift,
}

impl ParticleClass {
    pub const ALL: [ParticleClass; 3] = [
        ParticleClass::Foliage,
        ParticleClass::Ornament,
        ParticleClass::Gift,
    ];

    /// The fixed profile for this class
    pub fn profile(self) -> &'static ClassProfile {
        match self {
            ParticleClass::Foliage => &FOLIAGE,
            ParticleClass::Ornament => &ORNAMENT,
            ParticleClass::Gift => &GIFT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParticleClass::Foliage => "foliage",
            ParticleClass::Ornament => "ornament",
            ParticleClass::Gift => "gift",
        }
    }
}

impl fmt::Display for ParticleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weighted palette draw.
///
/// A uniform roll in [0, 1) is compared against `bands` in order; the first
/// band whose threshold the roll exceeds wins, otherwise `fallback` is used.
#[derive(Debug, Clone, Copy)]
pub struct ColorTable {
    pub bands: &'static [(f32, Swatch)],
    pub fallback: Swatch,
}

impl ColorTable {
    pub fn pick(&self, roll: f32) -> Swatch {
        self.bands
            .iter()
            .find(|(threshold, _)| roll > *threshold)
            .map(|(_, swatch)| *swatch)
            .unwrap_or(self.fallback)
    }
}

/// Per-class constants for generation and rendering
#[derive(Debug, Clone, Copy)]
pub struct ClassProfile {
    /// Full width of the uniform jitter added to each target axis
    pub jitter: f32,
    /// Multiplier on the target's horizontal offset from the trunk
    pub push_out: f32,
    /// Draw a random angular offset in [0, π) per particle
    pub random_angle_offset: bool,
    pub colors: ColorTable,
    /// Scale is `(scale_min + u * scale_span) * scale_factor`
    pub scale_min: f32,
    pub scale_span: f32,
    pub scale_factor: f32,
    /// X-axis spin in radians per second (Y spins at half this rate)
    pub spin_rate: f32,
    /// Rendered as a multi-layer composite (no spin)
    pub composite: bool,
}

impl ClassProfile {
    pub fn scale_for(&self, roll: f32) -> f32 {
        (self.scale_min + roll * self.scale_span) * self.scale_factor
    }

    /// Smallest and largest scale this profile can produce
    pub fn scale_range(&self) -> (f32, f32) {
        (self.scale_for(0.0), self.scale_for(1.0))
    }
}

pub const FOLIAGE: ClassProfile = ClassProfile {
    jitter: 0.35,
    push_out: 1.0,
    random_angle_offset: false,
    colors: ColorTable {
        bands: &[(0.75, Swatch::Leaf), (0.5, Swatch::Emerald), (0.25, Swatch::Pine)],
        fallback: Swatch::Forest,
    },
    scale_min: 0.08,
    scale_span: 0.12,
    scale_factor: 1.0,
    spin_rate: 0.1,
    composite: false,
};

// Diamond is in the palette but ornaments never roll it
pub const ORNAMENT: ClassProfile = ClassProfile {
    jitter: 0.1,
    push_out: 1.05,
    random_angle_offset: true,
    colors: ColorTable {
        bands: &[(0.6, Swatch::Gold), (0.4, Swatch::Ruby)],
        fallback: Swatch::GoldRose,
    },
    scale_min: 0.15,
    scale_span: 0.2,
    scale_factor: 2.0 / 3.0,
    spin_rate: 0.3,
    composite: false,
};

pub const GIFT: ClassProfile = ClassProfile {
    jitter: 0.1,
    push_out: 1.05,
    random_angle_offset: true,
    colors: ColorTable {
        bands: &[(0.6, Swatch::LightPurple), (0.3, Swatch::DarkRed)],
        fallback: Swatch::Emerald,
    },
    scale_min: 0.3,
    scale_span: 0.1,
    scale_factor: 1.0,
    spin_rate: 0.0,
    composite: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foliage_color_bands() {
        let table = FOLIAGE.colors;
        assert_eq!(table.pick(0.9), Swatch::Leaf);
        assert_eq!(table.pick(0.6), Swatch::Emerald);
        assert_eq!(table.pick(0.3), Swatch::Pine);
        assert_eq!(table.pick(0.1), Swatch::Forest);
        // Threshold itself falls to the next band
        assert_eq!(table.pick(0.75), Swatch::Emerald);
    }

    #[test]
    fn ornaments_never_pick_diamond() {
        let table = ORNAMENT.colors;
        for i in 0..100 {
            assert_ne!(table.pick(i as f32 / 100.0), Swatch::Diamond);
        }
        assert_eq!(table.pick(0.95), Swatch::Gold);
    }

    #[test]
    fn scale_ranges_are_ordered_by_class() {
        let (_, foliage_max) = FOLIAGE.scale_range();
        let (ornament_min, ornament_max) = ORNAMENT.scale_range();
        let (gift_min, _) = GIFT.scale_range();
        assert!(foliage_max <= ornament_max);
        assert!(ornament_max <= gift_min);
        assert!((ornament_min - 0.1).abs() < 1e-6);
    }

    #[test]
    fn only_gifts_are_composite() {
        for class in ParticleClass::ALL {
            assert_eq!(class.profile().composite, class == ParticleClass::Gift);
        }
    }

    #[test]
    fn foliage_spins_slower_than_ornaments() {
        assert!(FOLIAGE.spin_rate < ORNAMENT.spin_rate);
        assert_eq!(GIFT.spin_rate, 0.0);
    }
}
