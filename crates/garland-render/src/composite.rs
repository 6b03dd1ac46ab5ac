//! Gift boxes as one logical entity rendered across several layers

use crate::instance::InstanceTransform;
use crate::layer::LayerKind;
use crate::transform::transform_at;
use garland_core::{Color, Vec3};
use garland_particles::{Particle, ParticleClass, Swatch};

/// One visual layer of a composite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositePart {
    pub kind: LayerKind,
    /// Static offset baked into the layer's geometry
    pub offset: Vec3,
    /// Fixed color replacing the particle's own
    pub color_override: Option<Swatch>,
}

impl CompositePart {
    pub fn color(&self, particle: &Particle) -> Color {
        self.color_override
            .map(Swatch::color)
            .unwrap_or_else(|| particle.color())
    }
}

/// Box, lid and bow. The bow is always gold.
pub const GIFT_PARTS: [CompositePart; 3] = [
    CompositePart {
        kind: LayerKind::GiftBase,
        offset: Vec3::ZERO,
        color_override: None,
    },
    CompositePart {
        kind: LayerKind::GiftLid,
        offset: Vec3::new(0.0, 0.45, 0.0),
        color_override: None,
    },
    CompositePart {
        kind: LayerKind::GiftBow,
        offset: Vec3::new(0.0, 0.65, 0.0),
        color_override: Some(Swatch::Gold),
    },
];

/// A single gift: one particle record driving every part
#[derive(Debug, Clone, Copy)]
pub struct GiftComposite<'a> {
    pub index: usize,
    pub particle: &'a Particle,
}

impl<'a> GiftComposite<'a> {
    pub fn new(index: usize, particle: &'a Particle) -> Self {
        Self { index, particle }
    }

    pub fn parts(&self) -> &'static [CompositePart] {
        &GIFT_PARTS
    }

    /// The one transform shared by all parts this frame
    pub fn transform(&self, eased: f32, elapsed: f32) -> InstanceTransform {
        transform_at(ParticleClass::Gift, self.particle, eased, elapsed, 1.0)
    }

    /// World-space origin of each part under `transform`
    pub fn part_origins(&self, transform: &InstanceTransform) -> [(LayerKind, Vec3); 3] {
        GIFT_PARTS.map(|part| (part.kind, transform.local_to_world(part.offset)))
    }
}

/// The composite part rendered by `kind`, if it belongs to a gift
pub fn part_for(kind: LayerKind) -> Option<&'static CompositePart> {
    GIFT_PARTS.iter().find(|part| part.kind == kind)
}
