use glam::Vec3;
use serde::{Deserialize, Serialize};

/// First-person camera pose: the player's eye position plus look angles.
///
/// The player and the camera are one object; `position` is the eye and the
/// floor clamp applies to it directly. Yaw/pitch are radians with +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Full 3D look direction. Projectiles travel along this.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Look direction projected onto the ground plane and normalized.
    ///
    /// Computed from yaw alone, which equals projecting `forward` and
    /// renormalizing at every legal pitch and stays well defined at the
    /// straight-up/straight-down limit, where the projection itself
    /// degenerates to a zero vector.
    pub fn forward_flat(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Strafe axis: `forward × up`, ground-projected and normalized.
    pub fn right(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos())
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn forward_is_unit_length() {
        let pose = CameraPose::new(Vec3::ZERO, 0.7, -0.3);
        assert!((pose.forward().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn yaw_zero_faces_positive_x() {
        let pose = CameraPose::default();
        let f = pose.forward();
        assert!((f.x - 1.0).abs() < 1e-5);
        assert!(f.y.abs() < 1e-5);
        assert!(f.z.abs() < 1e-5);
    }

    #[test]
    fn negative_half_pi_yaw_faces_negative_z() {
        let pose = CameraPose::new(Vec3::ZERO, -FRAC_PI_2, 0.0);
        let f = pose.forward();
        assert!(f.x.abs() < 1e-5);
        assert!((f.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn flat_forward_ignores_pitch() {
        let level = CameraPose::new(Vec3::ZERO, 1.1, 0.0);
        let tilted = CameraPose::new(Vec3::ZERO, 1.1, 0.8);
        let a = level.forward_flat();
        let b = tilted.forward_flat();
        assert!((a - b).length() < 1e-5);
        assert_eq!(a.y, 0.0);
    }

    #[test]
    fn straight_down_keeps_the_yaw_heading() {
        let pose = CameraPose::new(Vec3::ZERO, 0.4, -FRAC_PI_2);
        let flat = pose.forward_flat();
        assert!((flat - Vec3::new(0.4_f32.cos(), 0.0, 0.4_f32.sin())).length() < 1e-6);
        assert!((flat.length() - 1.0).abs() < 1e-6);
        // The full look direction still points at the floor.
        assert!(pose.forward().y < -0.999);
    }

    #[test]
    fn right_is_perpendicular_to_forward() {
        let pose = CameraPose::new(Vec3::ZERO, 2.0, 0.2);
        let dot = pose.forward().dot(pose.right());
        assert!(dot.abs() < 1e-5);
    }

    #[test]
    fn right_matches_forward_cross_up() {
        let pose = CameraPose::new(Vec3::ZERO, 1.3, 0.5);
        let cross = pose.forward().cross(Vec3::Y).normalize();
        assert!((pose.right() - cross).length() < 1e-5);
    }
}
