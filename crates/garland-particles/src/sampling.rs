//! Random sampling helpers over any `rand::Rng`

use garland_core::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Returns a float in [0, 1)
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>()
}

/// Returns a float in [-width/2, width/2)
pub fn centered<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    (unit(rng) - 0.5) * width
}

/// Independent centered jitter on all three axes
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, width: f32) -> Vec3 {
    let x = centered(rng, width);
    let y = centered(rng, width);
    let z = centered(rng, width);
    Vec3::new(x, y, z)
}

/// Returns a point uniformly distributed in the volume of a sphere.
///
/// The cube root on the radial draw compensates for shell volume growing with
/// r², so points do not cluster at the center.
pub fn uniform_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let r = radius * unit(rng).cbrt();
    let theta = unit(rng) * TAU;
    let phi = (2.0 * unit(rng) - 1.0).clamp(-1.0, 1.0).acos();

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Angle in [0, π)
pub fn half_turn<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    unit(rng) * PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn centered_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = centered(&mut rng, 0.35);
            assert!((-0.175..0.175).contains(&v));
        }
    }

    #[test]
    fn sphere_points_inside_radius() {
        let mut rng = StdRng::seed_from_u64(123);
        for _ in 0..1000 {
            let p = uniform_in_sphere(&mut rng, 20.0);
            assert!(p.is_finite());
            assert!(p.length() <= 20.0 + 1e-3);
        }
    }

    #[test]
    fn sphere_points_not_center_clustered() {
        // Uniform in volume: half the points lie beyond R * cbrt(0.5) ≈ 0.794 R
        let mut rng = StdRng::seed_from_u64(7);
        let n = 4000;
        let outer = (0..n)
            .map(|_| uniform_in_sphere(&mut rng, 1.0))
            .filter(|p| p.length() > 0.5_f32.cbrt())
            .count();
        let fraction = outer as f32 / n as f32;
        assert!((fraction - 0.5).abs() < 0.05, "outer fraction {fraction}");
    }

    #[test]
    fn half_turn_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let a = half_turn(&mut rng);
            assert!((0.0..PI).contains(&a));
        }
    }
}
