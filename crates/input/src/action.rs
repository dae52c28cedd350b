/// A logical player action that any front-end can produce.
///
/// The simulation consumes sampled actions, never raw key events, so a
/// terminal client and a windowed client share the same gameplay logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move toward the camera's ground-projected forward.
    MoveForward,
    /// Move away from the camera's ground-projected forward.
    MoveBack,
    /// Strafe left.
    StrafeLeft,
    /// Strafe right.
    StrafeRight,
    /// Sprint modifier; doubles move speed while held.
    Sprint,
    /// Jump (edge-triggered, grounded only).
    Jump,
    /// Fire one projectile (edge-triggered).
    Fire,
}

impl Action {
    /// Whether this action contributes to the held movement axes.
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            Action::MoveForward | Action::MoveBack | Action::StrafeLeft | Action::StrafeRight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_actions_classified() {
        assert!(Action::MoveForward.is_movement());
        assert!(Action::StrafeRight.is_movement());
        assert!(!Action::Jump.is_movement());
        assert!(!Action::Fire.is_movement());
        assert!(!Action::Sprint.is_movement());
    }

    #[test]
    fn actions_are_hashable() {
        let mut set = std::collections::HashSet::new();
        set.insert(Action::MoveForward);
        set.insert(Action::MoveForward);
        assert_eq!(set.len(), 1);
    }
}
