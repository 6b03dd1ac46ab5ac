//! Per-instance transform and its GPU-facing layout

use bytemuck::{Pod, Zeroable};
use garland_core::{Color, Euler, Vec3};
use glam::{EulerRot, Mat4, Quat};
use serde::Serialize;

/// Position, orientation and uniform scale of one rendered instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstanceTransform {
    pub position: Vec3,
    /// Radians, applied in XYZ order
    pub rotation: Euler,
    pub scale: f32,
}

impl InstanceTransform {
    /// Column-major model matrix: translation * rotation * scale
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(
            glam::Vec3::splat(self.scale),
            rotation,
            glam::Vec3::from_array(self.position.to_array()),
        )
    }

    /// World position of a point given in the instance's local space
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        let p = self
            .to_matrix()
            .transform_point3(glam::Vec3::from_array(local.to_array()));
        Vec3::new(p.x, p.y, p.z)
    }
}

/// Instance data consumed by the shader, 80 bytes (5 x vec4)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub const STRIDE: usize = std::mem::size_of::<InstanceRaw>();

    pub fn new(transform: &InstanceTransform, color: Color) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
            color: color.to_array(),
        }
    }

    /// Translation column of the model matrix
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_five_vec4() {
        assert_eq!(InstanceRaw::STRIDE, 80);
    }

    #[test]
    fn identity_rotation_matrix() {
        let transform = InstanceTransform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Euler::IDENTITY,
            scale: 0.5,
        };
        let m = transform.to_matrix().to_cols_array_2d();
        assert_eq!(m[0], [0.5, 0.0, 0.0, 0.0]);
        assert_eq!(m[1], [0.0, 0.5, 0.0, 0.0]);
        assert_eq!(m[2], [0.0, 0.0, 0.5, 0.0]);
        assert_eq!(m[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn rotation_preserves_scale() {
        let transform = InstanceTransform {
            position: Vec3::ZERO,
            rotation: Euler::new(0.7, 1.3, 2.1),
            scale: 2.0,
        };
        let m = transform.to_matrix();
        for axis in [m.x_axis, m.y_axis, m.z_axis] {
            assert!((axis.truncate().length() - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn local_offset_follows_scale() {
        let transform = InstanceTransform {
            position: Vec3::new(0.0, 1.0, 0.0),
            rotation: Euler::IDENTITY,
            scale: 0.4,
        };
        let lid = transform.local_to_world(Vec3::new(0.0, 0.45, 0.0));
        assert!((lid.y - 1.18).abs() < 1e-6);

        let raw = InstanceRaw::new(&transform, Color::WHITE);
        assert_eq!(raw.translation(), transform.position);
    }
}
