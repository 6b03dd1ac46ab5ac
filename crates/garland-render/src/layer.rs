//! Render layers and their static geometry/material descriptors

use garland_core::Vec3;
use garland_particles::ParticleClass;
use serde::Serialize;
use std::fmt;

/// One instanced collection sharing a single geometry and material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Foliage,
    Ornaments,
    GiftBase,
    GiftLid,
    GiftBow,
}

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::Foliage,
        LayerKind::Ornaments,
        LayerKind::GiftBase,
        LayerKind::GiftLid,
        LayerKind::GiftBow,
    ];

    /// Particle collection this layer reads from
    pub fn class(self) -> ParticleClass {
        match self {
            LayerKind::Foliage => ParticleClass::Foliage,
            LayerKind::Ornaments => ParticleClass::Ornament,
            LayerKind::GiftBase | LayerKind::GiftLid | LayerKind::GiftBow => ParticleClass::Gift,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Foliage => "foliage",
            LayerKind::Ornaments => "ornaments",
            LayerKind::GiftBase => "gift_base",
            LayerKind::GiftLid => "gift_lid",
            LayerKind::GiftBow => "gift_bow",
        }
    }

    /// Part of a gift composite
    pub fn is_gift_part(self) -> bool {
        self.class() == ParticleClass::Gift
    }

    pub fn geometry(self) -> &'static LayerGeometry {
        match self {
            LayerKind::Foliage => &FOLIAGE_GEOMETRY,
            LayerKind::Ornaments => &ORNAMENT_GEOMETRY,
            LayerKind::GiftBase => &GIFT_BASE_GEOMETRY,
            LayerKind::GiftLid => &GIFT_LID_GEOMETRY,
            LayerKind::GiftBow => &GIFT_BOW_GEOMETRY,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mesh shape for a layer, in unscaled local units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerShape {
    Box { size: [f32; 3] },
    Icosahedron { radius: f32, detail: u32 },
    TorusKnot { radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32 },
}

/// PBR hints handed to the pipeline with each layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialHints {
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
    pub casts_shadow: bool,
}

/// Static description of a layer's mesh.
///
/// `local_offset` is baked into the vertices at initialization, so every
/// layer of a composite can share one instance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerGeometry {
    pub shape: LayerShape,
    pub local_offset: Vec3,
    pub material: MaterialHints,
}

pub const FOLIAGE_GEOMETRY: LayerGeometry = LayerGeometry {
    shape: LayerShape::Box {
        size: [1.0, 1.0, 1.0],
    },
    local_offset: Vec3::ZERO,
    material: MaterialHints {
        roughness: 0.9,
        metalness: 0.0,
        env_map_intensity: 0.1,
        casts_shadow: true,
    },
};

pub const ORNAMENT_GEOMETRY: LayerGeometry = LayerGeometry {
    shape: LayerShape::Icosahedron {
        radius: 1.0,
        detail: 1,
    },
    local_offset: Vec3::ZERO,
    material: MaterialHints {
        roughness: 0.1,
        metalness: 1.0,
        env_map_intensity: 1.0,
        casts_shadow: true,
    },
};

pub const GIFT_BASE_GEOMETRY: LayerGeometry = LayerGeometry {
    shape: LayerShape::Box {
        size: [0.9, 0.8, 0.9],
    },
    local_offset: Vec3::ZERO,
    material: MaterialHints {
        roughness: 0.2,
        metalness: 0.1,
        env_map_intensity: 0.5,
        casts_shadow: true,
    },
};

// Slightly wider than the base so it reads as a lid
pub const GIFT_LID_GEOMETRY: LayerGeometry = LayerGeometry {
    shape: LayerShape::Box {
        size: [1.05, 0.15, 1.05],
    },
    local_offset: Vec3::new(0.0, 0.45, 0.0),
    material: MaterialHints {
        roughness: 0.2,
        metalness: 0.1,
        env_map_intensity: 0.5,
        casts_shadow: true,
    },
};

pub const GIFT_BOW_GEOMETRY: LayerGeometry = LayerGeometry {
    shape: LayerShape::TorusKnot {
        radius: 0.22,
        tube: 0.05,
        tubular_segments: 64,
        radial_segments: 8,
    },
    local_offset: Vec3::new(0.0, 0.65, 0.0),
    material: MaterialHints {
        roughness: 0.1,
        metalness: 1.0,
        env_map_intensity: 1.5,
        casts_shadow: true,
    },
};
