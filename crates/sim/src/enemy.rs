use frostline_common::{EntityId, IdAllocator};
use glam::Vec3;

use crate::config::Tuning;
use crate::rng::GameRng;

/// A live enemy. Speed is fixed when it spawns; later score changes do
/// not retroactively accelerate it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec3,
    pub speed: f32,
}

/// Pool of live enemies, in spawn order.
#[derive(Debug, Clone, Default)]
pub struct EnemyPool {
    items: Vec<Enemy>,
}

impl EnemyPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one enemy on the far band and return it. The single
    /// lateral draw happens only when the spawn actually goes through,
    /// so a full pool leaves the rng stream untouched.
    pub fn spawn(
        &mut self,
        ids: &mut IdAllocator,
        rng: &mut GameRng,
        tuning: &Tuning,
        score: u32,
    ) -> Option<Enemy> {
        if self.items.len() >= tuning.max_enemies {
            tracing::debug!(cap = tuning.max_enemies, "enemy cap hit, spawn dropped");
            return None;
        }
        let x = rng.range(-tuning.spawn_half_width, tuning.spawn_half_width);
        let enemy = Enemy {
            id: ids.allocate(),
            position: Vec3::new(x, tuning.spawn_y, tuning.spawn_z),
            speed: tuning.enemy_speed + score as f32 * tuning.enemy_speed_per_score,
        };
        self.items.push(enemy);
        Some(enemy)
    }

    /// Home every enemy straight at `target` (full 3D, no arrival clamp).
    pub fn advance(&mut self, target: Vec3, dt: f32) {
        for e in &mut self.items {
            let direction = (target - e.position).normalize_or_zero();
            e.position += direction * e.speed * dt;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Enemy] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.items.iter()
    }

    pub(crate) fn retain<F: FnMut(&Enemy) -> bool>(&mut self, keep: F) {
        self.items.retain(keep);
    }
}

/// Fixed-interval spawn schedule driven by simulated time, so spawn
/// counts depend on elapsed sim time rather than frame rate.
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    acc_ms: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit elapsed sim time toward the schedule.
    pub fn accrue(&mut self, dt: f32) {
        self.acc_ms += dt * 1000.0;
    }

    /// Consume one due spawn slot, if any. Call in a loop: a long frame
    /// can owe several spawns at once.
    pub fn take_due(&mut self, tuning: &Tuning) -> bool {
        // Once the backlog dwarfs the interval, f32 subtraction stops
        // changing it; clamp the credit to one full pool so the drain
        // loop always terminates.
        let max_backlog = tuning.spawn_interval_ms * tuning.max_enemies as f32;
        self.acc_ms = self.acc_ms.min(max_backlog);
        if self.acc_ms >= tuning.spawn_interval_ms {
            self.acc_ms -= tuning.spawn_interval_ms;
            true
        } else {
            false
        }
    }

    /// Credit not yet converted into a spawn, in milliseconds.
    pub fn pending_ms(&self) -> f32 {
        self.acc_ms
    }
}
