use frostline_common::EntityId;
use glam::Vec3;

use crate::config::Tuning;
use crate::enemy::EnemyPool;
use crate::projectile::ProjectilePool;

/// What one resolution pass found: projectile/enemy kill pairs and
/// whether a surviving enemy reached the player.
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    /// `(projectile, enemy)` id pairs, in projectile pool order.
    pub kills: Vec<(EntityId, EntityId)>,
    pub player_hit: bool,
}

/// Resolve all contacts for one tick.
///
/// Pairs are collected before anything is removed, so every projectile
/// sees the full enemy set. Each projectile claims at most one enemy
/// (the first unclaimed one in pool order) and each enemy dies to at
/// most one projectile. Both members of every pair are then removed in
/// a single pass per pool. Player contact is tested only against
/// enemies that survived, so an enemy killed this tick cannot also end
/// the run.
///
/// All contact tests use strict `<` on Euclidean distance: a pair
/// exactly at the hit radius is a miss.
pub fn resolve(
    projectiles: &mut ProjectilePool,
    enemies: &mut EnemyPool,
    player_position: Vec3,
    tuning: &Tuning,
) -> CollisionOutcome {
    let radius = tuning.hit_radius;
    let mut kills: Vec<(EntityId, EntityId)> = Vec::new();

    for p in projectiles.iter() {
        for e in enemies.iter() {
            if kills.iter().any(|&(_, killed)| killed == e.id) {
                continue;
            }
            if p.position.distance(e.position) < radius {
                kills.push((p.id, e.id));
                break;
            }
        }
    }

    if !kills.is_empty() {
        projectiles.retain(|p| !kills.iter().any(|&(pid, _)| pid == p.id));
        enemies.retain(|e| !kills.iter().any(|&(_, eid)| eid == e.id));
    }

    let player_hit = enemies
        .iter()
        .any(|e| e.position.distance(player_position) < radius);

    CollisionOutcome { kills, player_hit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostline_common::{CameraPose, IdAllocator};
    use crate::rng::GameRng;

    // Places everything on the z axis: spawn_half_width 0 pins enemy x
    // to zero, and spawn_y/spawn_z carry the rest of the position.
    fn enemy_at(pool: &mut EnemyPool, ids: &mut IdAllocator, rng: &mut GameRng, z: f32) -> EntityId {
        let t = Tuning {
            spawn_half_width: 0.0,
            spawn_y: 0.0,
            spawn_z: z,
            ..Tuning::default()
        };
        pool.spawn(ids, rng, &t, 0).unwrap().id
    }

    fn shot_at(pool: &mut ProjectilePool, ids: &mut IdAllocator, z: f32) -> EntityId {
        let t = Tuning::default();
        let pose = CameraPose::new(Vec3::new(0.0, 0.0, z), 0.0, 0.0);
        pool.fire(&pose, ids, &t).unwrap()
    }

    fn far_player() -> Vec3 {
        Vec3::new(100.0, 0.0, 0.0)
    }

    #[test]
    fn contact_removes_both_and_reports_the_pair() {
        let t = Tuning::default();
        let mut ids = IdAllocator::new();
        let mut rng = GameRng::new(1);
        let mut projectiles = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        let pid = shot_at(&mut projectiles, &mut ids, 0.0);
        let eid = enemy_at(&mut enemies, &mut ids, &mut rng, 0.3);

        let outcome = resolve(&mut projectiles, &mut enemies, far_player(), &t);

        assert_eq!(outcome.kills, vec![(pid, eid)]);
        assert!(!outcome.player_hit);
        assert!(projectiles.is_empty());
        assert!(enemies.is_empty());
    }

    #[test]
    fn exactly_at_radius_is_a_miss() {
        let t = Tuning::default();
        let mut ids = IdAllocator::new();
        let mut rng = GameRng::new(1);
        let mut projectiles = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        shot_at(&mut projectiles, &mut ids, 0.0);
        enemy_at(&mut enemies, &mut ids, &mut rng, t.hit_radius);

        let outcome = resolve(&mut projectiles, &mut enemies, far_player(), &t);

        assert!(outcome.kills.is_empty());
        assert_eq!(projectiles.len(), 1);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn two_pairs_resolve_in_the_same_tick() {
        let t = Tuning::default();
        let mut ids = IdAllocator::new();
        let mut rng = GameRng::new(1);
        let mut projectiles = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        let p0 = shot_at(&mut projectiles, &mut ids, 0.0);
        let p1 = shot_at(&mut projectiles, &mut ids, 5.0);
        let e0 = enemy_at(&mut enemies, &mut ids, &mut rng, 0.2);
        let e1 = enemy_at(&mut enemies, &mut ids, &mut rng, 5.2);

        let outcome = resolve(&mut projectiles, &mut enemies, far_player(), &t);

        assert_eq!(outcome.kills, vec![(p0, e0), (p1, e1)]);
        assert!(projectiles.is_empty());
        assert!(enemies.is_empty());
    }

    #[test]
    fn one_projectile_claims_only_the_first_enemy() {
        let t = Tuning::default();
        let mut ids = IdAllocator::new();
        let mut rng = GameRng::new(1);
        let mut projectiles = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        let pid = shot_at(&mut projectiles, &mut ids, 0.0);
        let first = enemy_at(&mut enemies, &mut ids, &mut rng, 0.3);
        let second = enemy_at(&mut enemies, &mut ids, &mut rng, 0.4);

        let outcome = resolve(&mut projectiles, &mut enemies, far_player(), &t);

        assert_eq!(outcome.kills, vec![(pid, first)]);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies.as_slice()[0].id, second);
    }

    #[test]
    fn one_enemy_dies_to_only_the_first_projectile() {
        let t = Tuning::default();
        let mut ids = IdAllocator::new();
        let mut rng = GameRng::new(1);
        let mut projectiles = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        let first = shot_at(&mut projectiles, &mut ids, 0.1);
        let second = shot_at(&mut projectiles, &mut ids, 0.2);
        let eid = enemy_at(&mut enemies, &mut ids, &mut rng, 0.3);

        let outcome = resolve(&mut projectiles, &mut enemies, far_player(), &t);

        assert_eq!(outcome.kills, vec![(first, eid)]);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles.as_slice()[0].id, second);
    }

    #[test]
    fn surviving_enemy_in_reach_hits_the_player() {
        let t = Tuning::default();
        let mut ids = IdAllocator::new();
        let mut rng = GameRng::new(1);
        let mut projectiles = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        enemy_at(&mut enemies, &mut ids, &mut rng, 0.3);

        let outcome = resolve(&mut projectiles, &mut enemies, Vec3::ZERO, &t);

        assert!(outcome.player_hit);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn killed_enemy_cannot_also_hit_the_player() {
        let t = Tuning::default();
        let mut ids = IdAllocator::new();
        let mut rng = GameRng::new(1);
        let mut projectiles = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        // Enemy sits within the hit radius of both the shot and the player.
        shot_at(&mut projectiles, &mut ids, 0.5);
        enemy_at(&mut enemies, &mut ids, &mut rng, 0.3);

        let outcome = resolve(&mut projectiles, &mut enemies, Vec3::ZERO, &t);

        assert_eq!(outcome.kills.len(), 1);
        assert!(!outcome.player_hit);
        assert!(enemies.is_empty());
    }
}
