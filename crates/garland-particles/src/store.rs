//! Immutable per-session particle storage

use crate::class::ParticleClass;
use crate::generator::{generate_tree, TreeData};
use crate::particle::Particle;
use garland_core::{Result, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How many particles to generate per class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleCounts {
    #[serde(default = "default_foliage")]
    pub foliage: usize,
    #[serde(default = "default_ornaments")]
    pub ornaments: usize,
    #[serde(default = "default_gifts")]
    pub gifts: usize,
}

fn default_foliage() -> usize {
    7000
}
fn default_ornaments() -> usize {
    225
}
fn default_gifts() -> usize {
    225
}

impl Default for ParticleCounts {
    fn default() -> Self {
        Self {
            foliage: default_foliage(),
            ornaments: default_ornaments(),
            gifts: default_gifts(),
        }
    }
}

impl ParticleCounts {
    pub fn get(&self, class: ParticleClass) -> usize {
        match class {
            ParticleClass::Foliage => self.foliage,
            ParticleClass::Ornament => self.ornaments,
            ParticleClass::Gift => self.gifts,
        }
    }

    pub fn total(&self) -> usize {
        self.foliage + self.ornaments + self.gifts
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    fn around<'a>(points: impl Iterator<Item = &'a Vec3>) -> Option<Self> {
        points.fold(None, |acc: Option<Bounds>, p| {
            Some(match acc {
                None => Bounds { min: *p, max: *p },
                Some(b) => Bounds {
                    min: Vec3::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z)),
                    max: Vec3::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z)),
                },
            })
        })
    }
}

/// The generated collections, created once and only read afterwards.
///
/// Regenerating would reshuffle the layout, so there is no mutation API;
/// build a new store instead.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    foliage: Vec<Particle>,
    ornaments: Vec<Particle>,
    gifts: Vec<Particle>,
}

impl ParticleStore {
    /// Generate all collections from the given random source
    pub fn generate<R: Rng + ?Sized>(counts: ParticleCounts, rng: &mut R) -> Result<Self> {
        let tree = generate_tree(counts.foliage, counts.ornaments, counts.gifts, rng)?;
        log::info!(
            "Generated particle store: {} foliage, {} ornaments, {} gifts",
            tree.foliage.len(),
            tree.ornaments.len(),
            tree.gifts.len()
        );
        Ok(Self::from_tree(tree))
    }

    pub fn from_tree(tree: TreeData) -> Self {
        Self {
            foliage: tree.foliage,
            ornaments: tree.ornaments,
            gifts: tree.gifts,
        }
    }

    pub fn collection(&self, class: ParticleClass) -> &[Particle] {
        match class {
            ParticleClass::Foliage => &self.foliage,
            ParticleClass::Ornament => &self.ornaments,
            ParticleClass::Gift => &self.gifts,
        }
    }

    pub fn foliage(&self) -> &[Particle] {
        &self.foliage
    }

    pub fn ornaments(&self) -> &[Particle] {
        &self.ornaments
    }

    pub fn gifts(&self) -> &[Particle] {
        &self.gifts
    }

    pub fn counts(&self) -> ParticleCounts {
        ParticleCounts {
            foliage: self.foliage.len(),
            ornaments: self.ornaments.len(),
            gifts: self.gifts.len(),
        }
    }

    /// Bounds of the assembled tree for one class
    pub fn target_bounds(&self, class: ParticleClass) -> Option<Bounds> {
        Bounds::around(self.collection(class).iter().map(|p| &p.target_position))
    }

    /// Bounds of the scattered cloud for one class
    pub fn start_bounds(&self, class: ParticleClass) -> Option<Bounds> {
        Bounds::around(self.collection(class).iter().map(|p| &p.start_position))
    }

    /// Snapshot of the collections for serialization
    pub fn to_tree(&self) -> TreeData {
        TreeData {
            foliage: self.foliage.clone(),
            ornaments: self.ornaments.clone(),
            gifts: self.gifts.clone(),
        }
    }
}
