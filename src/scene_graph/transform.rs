use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Local position, rotation and scale of an entity.
///
/// Rotation is stored as Euler angles in radians and applied X first, then Y,
/// then Z (`Rz * Ry * Rx`). The local matrix is `T * R * S` for column vectors,
/// so a point is scaled, then rotated, then translated.
///
/// Nothing is cached: every derived value is recomputed from the current
/// fields on each call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.rotation.z,
            self.rotation.y,
            self.rotation.x,
        )
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }

    // The basis vectors carry the scale, they are columns of the full matrix.
    pub fn forward(&self) -> Vec3 {
        self.matrix().z_axis.truncate()
    }

    pub fn right(&self) -> Vec3 {
        self.matrix().x_axis.truncate()
    }

    pub fn up(&self) -> Vec3 {
        self.matrix().y_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn default_is_identity() {
        let transform = Transform::default();
        assert_eq!(transform.matrix(), Mat4::IDENTITY);
        assert_eq!(transform.forward(), Vec3::Z);
        assert_eq!(transform.right(), Vec3::X);
        assert_eq!(transform.up(), Vec3::Y);
    }

    #[test]
    fn scale_is_applied_before_translation() {
        let transform = Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::splat(2.0));
        let point = transform.matrix().transform_point3(Vec3::ONE);
        assert!(point.abs_diff_eq(Vec3::new(3.0, 4.0, 5.0), 1e-6));
    }

    #[test]
    fn yaw_turns_forward_towards_x() {
        let transform = Transform::new(Vec3::ZERO, Vec3::new(0.0, FRAC_PI_2, 0.0), Vec3::ONE);
        assert!(transform.forward().abs_diff_eq(Vec3::X, 1e-6));
        assert!(transform.right().abs_diff_eq(-Vec3::Z, 1e-6));
        assert!(transform.up().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn x_rotation_is_applied_before_z() {
        let transform = Transform::new(
            Vec3::ZERO,
            Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2),
            Vec3::ONE,
        );
        // Y is rotated onto Z by the X rotation, which Z rotation then leaves alone.
        let rotated = transform.matrix().transform_vector3(Vec3::Y);
        assert!(rotated.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn basis_is_recomputed_after_mutation() {
        let mut transform = Transform::default();
        assert_eq!(transform.up(), Vec3::Y);
        transform.scale = Vec3::new(1.0, 3.0, 1.0);
        assert!(transform.up().abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-6));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let transform: Transform =
            serde_json::from_str(r#"{ "position": [1.0, 2.0, 3.0] }"#).unwrap();
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Vec3::ZERO);
        assert_eq!(transform.scale, Vec3::ONE);
    }
}
