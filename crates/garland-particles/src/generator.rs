//! Procedural layout of the tree cone and the scattered cloud

use crate::class::{ClassProfile, ParticleClass};
use crate::particle::Particle;
use crate::sampling;
use garland_core::{Euler, GarlandError, Result, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest point of the cone (its base)
pub const HEIGHT_MIN: f32 = -4.5;
/// Vertical extent of the cone
pub const HEIGHT_RANGE: f32 = 9.0;
/// Cone radius at the base
pub const MAX_RADIUS: f32 = 3.5;
/// Angular step between consecutive particles, in radians
pub const GOLDEN_ANGLE: f32 = 2.39996;
/// Radius of the sphere the scattered cloud fills
pub const SCATTER_RADIUS: f32 = 20.0;

/// All three generated collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeData {
    pub foliage: Vec<Particle>,
    pub ornaments: Vec<Particle>,
    pub gifts: Vec<Particle>,
}

/// Normalized position of `index` along the cone, in [0, 1].
///
/// A single-particle collection sits at the base (`p = 0`).
pub fn normalized_index(index: usize, count: usize) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    (index.min(count - 1)) as f32 / (count - 1) as f32
}

/// Cone height at normalized position `p`
pub fn cone_height(p: f32) -> f32 {
    HEIGHT_MIN + p * HEIGHT_RANGE
}

/// Cone radius at normalized position `p`; `MAX_RADIUS` at the base, 0 at the tip
pub fn cone_radius(p: f32) -> f32 {
    (1.0 - p) * MAX_RADIUS
}

/// Un-jittered target on the cone surface
fn cone_anchor(index: usize, p: f32, angle_offset: f32, profile: &ClassProfile) -> Vec3 {
    let radius = cone_radius(p);
    let theta = index as f32 * GOLDEN_ANGLE + angle_offset;
    Vec3::new(
        theta.cos() * radius * profile.push_out,
        cone_height(p),
        theta.sin() * radius * profile.push_out,
    )
}

/// Generate `count` particles of one class.
///
/// Fails on `count == 0`; a count of 1 places its particle at the cone base.
pub fn generate_particles<R: Rng + ?Sized>(
    class: ParticleClass,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Particle>> {
    if count == 0 {
        return Err(GarlandError::InvalidParticleCount {
            class: class.name().to_string(),
            count,
        });
    }

    let profile = class.profile();
    let mut particles = Vec::with_capacity(count);

    for i in 0..count {
        let p = normalized_index(i, count);

        // Decorations get their own angular phase so they don't line up with foliage
        let angle_offset = if profile.random_angle_offset {
            sampling::half_turn(rng)
        } else {
            0.0
        };
        let target_position =
            cone_anchor(i, p, angle_offset, profile) + sampling::jitter(rng, profile.jitter);

        let start_position = sampling::uniform_in_sphere(rng, SCATTER_RADIUS);

        let swatch = profile.colors.pick(sampling::unit(rng));
        let scale = profile.scale_for(sampling::unit(rng));

        let rotation = Euler::new(
            sampling::half_turn(rng),
            sampling::half_turn(rng),
            sampling::half_turn(rng),
        );

        particles.push(Particle {
            start_position,
            target_position,
            rotation,
            scale,
            swatch,
        });
    }

    log::debug!("Generated {count} {class} particles");
    Ok(particles)
}

/// Generate the full tree: foliage, ornaments and gifts
pub fn generate_tree<R: Rng + ?Sized>(
    foliage_count: usize,
    ornament_count: usize,
    gift_count: usize,
    rng: &mut R,
) -> Result<TreeData> {
    Ok(TreeData {
        foliage: generate_particles(ParticleClass::Foliage, foliage_count, rng)?,
        ornaments: generate_particles(ParticleClass::Ornament, ornament_count, rng)?,
        gifts: generate_particles(ParticleClass::Gift, gift_count, rng)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn all_particles_valid_for_supported_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        for class in ParticleClass::ALL {
            for count in [2, 3, 17, 500] {
                let particles = generate_particles(class, count, &mut rng).unwrap();
                assert_eq!(particles.len(), count);
                assert!(particles.iter().all(Particle::is_valid));
            }
        }
    }

    #[test]
    fn zero_count_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let err = generate_particles(ParticleClass::Ornament, 0, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GarlandError::InvalidParticleCount { count: 0, .. }
        ));
    }

    #[test]
    fn single_particle_sits_at_base() {
        let mut rng = StdRng::seed_from_u64(3);
        let particles = generate_particles(ParticleClass::Gift, 1, &mut rng).unwrap();
        let target = particles[0].target_position;
        assert!(target.is_finite());
        let half = ParticleClass::Gift.profile().jitter / 2.0;
        assert!((target.y - HEIGHT_MIN).abs() <= half + 1e-6);
    }

    #[test]
    fn cone_height_monotonic() {
        let count = 7000;
        let mut last = f32::NEG_INFINITY;
        for i in 0..count {
            let y = cone_height(normalized_index(i, count));
            assert!(y >= last);
            last = y;
        }
        assert!((last - (HEIGHT_MIN + HEIGHT_RANGE)).abs() < 1e-4);
    }

    #[test]
    fn cone_radius_endpoints() {
        assert!((cone_radius(0.0) - MAX_RADIUS).abs() < 1e-6);
        assert!(cone_radius(1.0).abs() < 1e-6);
    }

    #[test]
    fn targets_stay_within_jitter_of_cone() {
        let mut rng = StdRng::seed_from_u64(4);
        let count = 300;
        let particles = generate_particles(ParticleClass::Foliage, count, &mut rng).unwrap();
        let half = ParticleClass::Foliage.profile().jitter / 2.0;
        for (i, particle) in particles.iter().enumerate() {
            let p = normalized_index(i, count);
            assert!((particle.target_position.y - cone_height(p)).abs() <= half + 1e-5);
            // Horizontal offset is bounded by the radius plus jitter on both axes
            let max_r = cone_radius(p) + half * std::f32::consts::SQRT_2 + 1e-4;
            assert!(particle.target_position.horizontal_length() <= max_r);
        }
    }

    #[test]
    fn decorations_pushed_out() {
        // Push-out keeps ornaments at the base outside the bare cone radius
        let mut rng = StdRng::seed_from_u64(5);
        let particles = generate_particles(ParticleClass::Ornament, 2, &mut rng).unwrap();
        let r = particles[0].target_position.horizontal_length();
        assert!(r > MAX_RADIUS * 1.05 - 0.08);
    }

    #[test]
    fn start_positions_inside_scatter_sphere() {
        let mut rng = StdRng::seed_from_u64(6);
        let particles = generate_particles(ParticleClass::Foliage, 1000, &mut rng).unwrap();
        for particle in &particles {
            assert!(particle.start_position.length() <= SCATTER_RADIUS + 1e-3);
        }
    }

    #[test]
    fn rotations_within_half_turn() {
        let mut rng = StdRng::seed_from_u64(8);
        let particles = generate_particles(ParticleClass::Gift, 100, &mut rng).unwrap();
        for particle in &particles {
            for a in [particle.rotation.x, particle.rotation.y, particle.rotation.z] {
                assert!((0.0..std::f32::consts::PI).contains(&a));
            }
        }
    }

    #[test]
    fn generate_two_per_class() {
        let mut rng = StdRng::seed_from_u64(2024);
        let tree = generate_tree(2, 2, 2, &mut rng).unwrap();
        for collection in [&tree.foliage, &tree.ornaments, &tree.gifts] {
            assert_eq!(collection.len(), 2);
            let r0 = collection[0].target_position.horizontal_length();
            let r1 = collection[1].target_position.horizontal_length();
            assert!(r0 > r1, "base radius {r0} should exceed tip radius {r1}");
        }
    }

    #[test]
    fn scales_within_class_range() {
        let mut rng = StdRng::seed_from_u64(10);
        let tree = generate_tree(400, 100, 100, &mut rng).unwrap();
        for (class, collection) in [
            (ParticleClass::Foliage, &tree.foliage),
            (ParticleClass::Ornament, &tree.ornaments),
            (ParticleClass::Gift, &tree.gifts),
        ] {
            let (min, max) = class.profile().scale_range();
            for particle in collection {
                assert!(particle.scale >= min - 1e-6 && particle.scale <= max + 1e-6);
            }
        }
    }
}
