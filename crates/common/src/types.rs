use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier for a game entity (projectile or enemy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Hands out sequential entity ids.
///
/// Sequential allocation keeps id assignment (and therefore pool iteration
/// and state hashing) identical across runs with the same seed, which random
/// ids would not.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// One tick's worth of sampled input, consumed by the simulation.
///
/// Held state (movement axes, sprint) reflects what is currently down; jump
/// and shots are edge events queued since the previous sample; yaw/pitch are
/// the absolute look angles owned by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Movement intent: x is strafe (+right), y is forward (+ahead).
    pub move_axis: Vec2,
    /// Sprint modifier currently held.
    pub sprint: bool,
    /// A jump was requested since the last sample.
    pub jump: bool,
    /// Number of shots fired since the last sample.
    pub shots: u32,
    /// Absolute look yaw in radians.
    pub yaw: f32,
    /// Absolute look pitch in radians, clamped by the input layer.
    pub pitch: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.allocate(), EntityId(0));
        assert_eq!(alloc.allocate(), EntityId(1));
        assert_eq!(alloc.allocate(), EntityId(2));
        assert_eq!(alloc.issued(), 3);
    }

    #[test]
    fn ids_order_matches_allocation_order() {
        let mut alloc = IdAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        assert!(a < b);
    }

    #[test]
    fn frame_input_default_is_inert() {
        let input = FrameInput::default();
        assert_eq!(input.move_axis, Vec2::ZERO);
        assert!(!input.sprint);
        assert!(!input.jump);
        assert_eq!(input.shots, 0);
    }
}
