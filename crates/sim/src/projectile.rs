use frostline_common::{CameraPose, EntityId, IdAllocator};
use glam::Vec3;

use crate::config::Tuning;

/// A live projectile. Velocity is fixed at launch and never steered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Pool of live projectiles, in launch order.
#[derive(Debug, Clone, Default)]
pub struct ProjectilePool {
    items: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch one projectile from the eye along the camera's full look
    /// direction (pitch included). Returns `None` when the pool cap drops
    /// the shot.
    pub fn fire(
        &mut self,
        pose: &CameraPose,
        ids: &mut IdAllocator,
        tuning: &Tuning,
    ) -> Option<EntityId> {
        if self.items.len() >= tuning.max_projectiles {
            tracing::debug!(cap = tuning.max_projectiles, "projectile cap hit, shot dropped");
            return None;
        }
        let id = ids.allocate();
        self.items.push(Projectile {
            id,
            position: pose.position,
            velocity: pose.forward() * tuning.projectile_speed,
        });
        Some(id)
    }

    /// Move every projectile, then cull anything beyond range.
    ///
    /// Range is measured from the world origin, not from the player, so
    /// shots fired far from the center expire sooner in that direction.
    pub fn advance(&mut self, tuning: &Tuning, dt: f32) {
        for p in &mut self.items {
            p.position += p.velocity * dt;
        }
        let range = tuning.projectile_range;
        self.items.retain(|p| p.position.length() <= range);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.items.iter()
    }

    pub(crate) fn retain<F: FnMut(&Projectile) -> bool>(&mut self, keep: F) {
        self.items.retain(keep);
    }
}
