//! Garland Particles - procedural tree particle generation
//!
//! Produces the three particle collections that make up the tree:
//! - Foliage: thousands of small matte cubes forming the cone body
//! - Ornaments: metallic spheres hanging just outside the foliage
//! - Gifts: composite boxes (base, lid, bow) scattered over the surface
//!
//! Every particle carries a scattered start position, an assembled target
//! position on the cone, a fixed base rotation, a scale, and a palette color.
//! Collections are generated once and held immutably in a `ParticleStore`.

pub mod class;
pub mod generator;
pub mod palette;
pub mod particle;
pub mod sampling;
pub mod store;

pub use class::{ClassProfile, ColorTable, ParticleClass};
pub use generator::{
    cone_height, cone_radius, generate_particles, generate_tree, normalized_index, TreeData,
};
pub use palette::Swatch;
pub use particle::Particle;
pub use store::{Bounds, ParticleCounts, ParticleStore};
