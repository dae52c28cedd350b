use frostline_common::{CameraPose, FrameInput};
use glam::Vec3;

use crate::config::Tuning;

/// The player's mutable state. Position is the camera eye; the floor clamp
/// holds it at eye height, not at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub can_jump: bool,
    pub is_sprinting: bool,
    pub move_speed: f32,
}

impl PlayerState {
    /// Fresh player at the tuned spawn point. Spawns airborne; the first
    /// ticks integrate the fall onto the floor.
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            position: tuning.spawn_position,
            vertical_velocity: 0.0,
            can_jump: false,
            is_sprinting: false,
            move_speed: tuning.base_speed,
        }
    }

    /// Camera-relative horizontal movement. Instantaneous speed: normalized
    /// intent scaled by `move_speed * dt` lands directly on position, no
    /// acceleration or damping.
    pub fn apply_movement(
        &mut self,
        input: &FrameInput,
        pose: &CameraPose,
        tuning: &Tuning,
        dt: f32,
    ) {
        self.is_sprinting = input.sprint;
        self.move_speed = if input.sprint {
            tuning.sprint_speed
        } else {
            tuning.base_speed
        };

        let intent = input.move_axis.normalize_or_zero();
        // The second normalize guards the no-intent case.
        let direction =
            (pose.forward_flat() * intent.y + pose.right() * intent.x).normalize_or_zero();
        self.position += direction * self.move_speed * dt;
    }

    /// Consume a queued jump. Only a grounded player leaves the floor.
    pub fn apply_jump(&mut self, tuning: &Tuning) {
        if self.can_jump {
            self.vertical_velocity = tuning.jump_impulse;
            self.can_jump = false;
        }
    }

    /// Integrate gravity into vertical velocity and position.
    pub fn integrate_gravity(&mut self, tuning: &Tuning, dt: f32) {
        self.vertical_velocity -= tuning.gravity * dt;
        self.position.y += self.vertical_velocity * dt;
    }

    /// Clamp to the floor. Landing zeroes vertical velocity and restores
    /// the jump.
    pub fn clamp_to_floor(&mut self, tuning: &Tuning) {
        if self.position.y <= tuning.floor_height {
            self.position.y = tuning.floor_height;
            self.vertical_velocity = 0.0;
            self.can_jump = true;
        }
    }
}
