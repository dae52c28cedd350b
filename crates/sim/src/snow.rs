use glam::Vec3;

use crate::config::Tuning;
use crate::rng::GameRng;

/// Ambient snowfall: a fixed-size field of flakes drifting down and
/// sideways. Flakes never interact with anything; a flake that falls
/// below the floor plane is redrawn at the top of the band.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowField {
    flakes: Vec<Vec3>,
}

impl SnowField {
    pub fn new(rng: &mut GameRng, tuning: &Tuning) -> Self {
        let mut flakes = Vec::with_capacity(tuning.snow_count);
        for _ in 0..tuning.snow_count {
            flakes.push(Self::draw(rng, tuning));
        }
        Self { flakes }
    }

    fn draw(rng: &mut GameRng, tuning: &Tuning) -> Vec3 {
        let x = rng.range(-tuning.snow_half_extent, tuning.snow_half_extent);
        let y = rng.range(tuning.snow_min_height, tuning.snow_max_height);
        let z = rng.range(-tuning.snow_half_extent, tuning.snow_half_extent);
        Vec3::new(x, y, z)
    }

    /// Advance every flake. Drift is along -x, fall along -y; a flake
    /// crossing y = 0 respawns with all three coordinates redrawn, so
    /// sideways drift never thins the field out permanently.
    pub fn advance(&mut self, rng: &mut GameRng, tuning: &Tuning, dt: f32) {
        for flake in &mut self.flakes {
            flake.x -= tuning.snow_drift_speed * dt;
            flake.y -= tuning.snow_fall_speed * dt;
            if flake.y < 0.0 {
                *flake = Self::draw(rng, tuning);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn flakes(&self) -> &[Vec3] {
        &self.flakes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tuning() -> Tuning {
        Tuning {
            snow_count: 64,
            ..Tuning::default()
        }
    }

    #[test]
    fn field_starts_inside_the_band() {
        let t = small_tuning();
        let mut rng = GameRng::new(42);
        let field = SnowField::new(&mut rng, &t);
        assert_eq!(field.len(), 64);
        for f in field.flakes() {
            assert!(f.x >= -t.snow_half_extent && f.x < t.snow_half_extent);
            assert!(f.y >= t.snow_min_height && f.y < t.snow_max_height);
            assert!(f.z >= -t.snow_half_extent && f.z < t.snow_half_extent);
        }
    }

    #[test]
    fn flakes_fall_and_drift() {
        let t = small_tuning();
        let mut rng = GameRng::new(42);
        let mut field = SnowField::new(&mut rng, &t);
        let before = field.flakes().to_vec();

        field.advance(&mut rng, &t, 0.1);

        for (old, new) in before.iter().zip(field.flakes()) {
            assert!((old.x - new.x - t.snow_drift_speed * 0.1).abs() < 1e-5);
            assert!((old.y - new.y - t.snow_fall_speed * 0.1).abs() < 1e-5);
            assert_eq!(old.z, new.z);
        }
    }

    #[test]
    fn fallen_flakes_respawn_above_the_floor() {
        let t = small_tuning();
        let mut rng = GameRng::new(42);
        let mut field = SnowField::new(&mut rng, &t);

        // max_height / fall_speed seconds clears the whole band at
        // least once.
        let mut respawned = 0;
        for _ in 0..200 {
            let before = field.flakes().to_vec();
            field.advance(&mut rng, &t, 0.1);
            for (old, new) in before.iter().zip(field.flakes()) {
                assert!(new.y >= 0.0);
                if new.y > old.y {
                    respawned += 1;
                    assert!(new.y >= t.snow_min_height);
                    assert!(new.x >= -t.snow_half_extent && new.x < t.snow_half_extent);
                }
            }
        }
        assert!(respawned >= 64, "only {respawned} respawns in 20 s");
        // Respawn replaces in place; the field never grows or shrinks.
        assert_eq!(field.len(), 64);
    }

    #[test]
    fn same_seed_yields_the_same_field() {
        let t = small_tuning();
        let mut rng_a = GameRng::new(9);
        let mut rng_b = GameRng::new(9);
        let mut a = SnowField::new(&mut rng_a, &t);
        let mut b = SnowField::new(&mut rng_b, &t);
        for _ in 0..50 {
            a.advance(&mut rng_a, &t, 0.016);
            b.advance(&mut rng_b, &t, 0.016);
        }
        assert_eq!(a, b);
    }
}
