//! The fixed tree palette
//!
//! Swatches are authored as sRGB hex and converted to linear space on lookup,
//! so shading and blending happen in linear color.

use garland_core::Color;
use serde::{Deserialize, Serialize};

/// A named palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Swatch {
    Gold,
    GoldRose,
    Ruby,
    Diamond,
    Emerald,
    Forest,
    Pine,
    Leaf,
    LightPurple,
    DarkRed,
    Cream,
}

impl Swatch {
    pub const ALL: [Swatch; 11] = [
        Swatch::Gold,
        Swatch::GoldRose,
        Swatch::Ruby,
        Swatch::Diamond,
        Swatch::Emerald,
        Swatch::Forest,
        Swatch::Pine,
        Swatch::Leaf,
        Swatch::LightPurple,
        Swatch::DarkRed,
        Swatch::Cream,
    ];

    /// sRGB hex value as authored
    pub const fn srgb_hex(self) -> u32 {
        match self {
            Swatch::Gold => 0xFFD700,
            Swatch::GoldRose => 0xE0BFB8,
            Swatch::Ruby => 0x880015,
            Swatch::Diamond => 0xE0F7FA,
            Swatch::Emerald => 0x006B3C,
            Swatch::Forest => 0x1A3C25,
            Swatch::Pine => 0x2D5A27,
            Swatch::Leaf => 0x4A7023,
            Swatch::LightPurple => 0xD8B5FF,
            Swatch::DarkRed => 0x500000,
            Swatch::Cream => 0xF5F5DC,
        }
    }

    /// Linear-space color
    pub fn color(self) -> Color {
        Color::from_srgb_hex(self.srgb_hex())
    }
}
