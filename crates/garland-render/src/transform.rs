//! Per-frame transform synthesis for a single particle

use crate::instance::InstanceTransform;
use garland_particles::{Particle, ParticleClass};

/// Fraction of base scale shown while fully scattered
pub const SCATTERED_SCALE_FRACTION: f32 = 0.6;

/// Scale multiplier at blend `eased`: 0.6 scattered, 1.0 assembled
pub fn scale_envelope(eased: f32) -> f32 {
    SCATTERED_SCALE_FRACTION + (1.0 - SCATTERED_SCALE_FRACTION) * eased
}

/// Compute where `particle` is drawn this frame.
///
/// Composite classes keep their base rotation; everything else spins on X at
/// the class spin rate and on Y at half of it, driven by `elapsed` seconds.
pub fn transform_at(
    class: ParticleClass,
    particle: &Particle,
    eased: f32,
    elapsed: f32,
    layer_multiplier: f32,
) -> InstanceTransform {
    let profile = class.profile();

    let rotation = if profile.composite {
        particle.rotation
    } else {
        let spin = elapsed * profile.spin_rate;
        particle.rotation.spun(spin, spin * 0.5)
    };

    InstanceTransform {
        position: particle.position_at(eased),
        rotation,
        scale: particle.scale * scale_envelope(eased) * layer_multiplier,
    }
}

/// Pose written at initialization, before the first frame
pub fn scattered_pose(particle: &Particle) -> InstanceTransform {
    InstanceTransform {
        position: particle.start_position,
        rotation: particle.rotation,
        scale: particle.scale * SCATTERED_SCALE_FRACTION,
    }
}
