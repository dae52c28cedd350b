use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;

use frostline_common::FrameInput;
use glam::Vec2;

use crate::action::Action;

/// Accumulates key events between ticks and produces one `FrameInput` per
/// sample.
///
/// Held actions (movement, sprint) are level-triggered: down on press, up on
/// release. Jump and fire are edge-triggered and queued; a key held across
/// several ticks queues exactly one jump, while every distinct fire press
/// queues one shot. Look angles live here because the pointer owns them, not
/// the simulation; pitch is clamped so the pose can never flip over.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Action>,
    jump_queued: bool,
    shots_queued: u32,
    yaw: f32,
    pitch: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given look angles (the spawn orientation).
    pub fn with_look(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
            ..Self::default()
        }
    }

    /// Record a key-down for the given action.
    pub fn press(&mut self, action: Action) {
        match action {
            Action::Jump => {
                // Key repeat re-delivers press while held; only a fresh
                // edge queues a jump.
                if self.held.insert(action) {
                    self.jump_queued = true;
                }
            }
            Action::Fire => {
                self.held.insert(action);
                self.shots_queued += 1;
            }
            _ => {
                self.held.insert(action);
            }
        }
    }

    /// Record a key-up for the given action.
    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Release everything held (focus loss, leaving the playing screen).
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Apply a look delta in radians. Positive `dy` looks down.
    pub fn apply_look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx;
        self.pitch = (self.pitch - dy).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Produce this tick's input sample, draining queued edges.
    pub fn sample(&mut self) -> FrameInput {
        let mut axis = Vec2::ZERO;
        if self.held.contains(&Action::MoveForward) {
            axis.y += 1.0;
        }
        if self.held.contains(&Action::MoveBack) {
            axis.y -= 1.0;
        }
        if self.held.contains(&Action::StrafeRight) {
            axis.x += 1.0;
        }
        if self.held.contains(&Action::StrafeLeft) {
            axis.x -= 1.0;
        }

        FrameInput {
            move_axis: axis,
            sprint: self.held.contains(&Action::Sprint),
            jump: std::mem::take(&mut self.jump_queued),
            shots: std::mem::take(&mut self.shots_queued),
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_movement_builds_axes() {
        let mut input = InputState::new();
        input.press(Action::MoveForward);
        input.press(Action::StrafeRight);
        let frame = input.sample();
        assert_eq!(frame.move_axis, Vec2::new(1.0, 1.0));

        input.release(Action::MoveForward);
        let frame = input.sample();
        assert_eq!(frame.move_axis, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn opposed_keys_cancel() {
        let mut input = InputState::new();
        input.press(Action::MoveForward);
        input.press(Action::MoveBack);
        assert_eq!(input.sample().move_axis, Vec2::ZERO);
    }

    #[test]
    fn jump_queues_once_per_edge() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        input.press(Action::Jump); // key repeat
        let first = input.sample();
        assert!(first.jump);

        // Still held: no new edge, no new jump.
        let second = input.sample();
        assert!(!second.jump);

        input.release(Action::Jump);
        input.press(Action::Jump);
        assert!(input.sample().jump);
    }

    #[test]
    fn every_fire_press_queues_a_shot() {
        let mut input = InputState::new();
        input.press(Action::Fire);
        input.release(Action::Fire);
        input.press(Action::Fire);
        input.release(Action::Fire);
        input.press(Action::Fire);
        let frame = input.sample();
        assert_eq!(frame.shots, 3);
        // Drained.
        assert_eq!(input.sample().shots, 0);
    }

    #[test]
    fn sprint_is_level_triggered() {
        let mut input = InputState::new();
        input.press(Action::Sprint);
        assert!(input.sample().sprint);
        assert!(input.sample().sprint);
        input.release(Action::Sprint);
        assert!(!input.sample().sprint);
    }

    #[test]
    fn pitch_clamps_at_poles() {
        let mut input = InputState::new();
        input.apply_look(0.0, -10.0);
        assert_eq!(input.pitch(), FRAC_PI_2);
        input.apply_look(0.0, 20.0);
        assert_eq!(input.pitch(), -FRAC_PI_2);
    }

    #[test]
    fn look_flows_into_sample() {
        let mut input = InputState::with_look(1.5, 0.25);
        let frame = input.sample();
        assert_eq!(frame.yaw, 1.5);
        assert_eq!(frame.pitch, 0.25);
    }

    #[test]
    fn release_all_clears_held_but_not_look() {
        let mut input = InputState::with_look(0.5, 0.0);
        input.press(Action::MoveForward);
        input.press(Action::Sprint);
        input.release_all();
        let frame = input.sample();
        assert_eq!(frame.move_axis, Vec2::ZERO);
        assert!(!frame.sprint);
        assert_eq!(frame.yaw, 0.5);
    }
}
