use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from tuning validation.
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{0} must be at least 1")]
    ZeroCap(&'static str),
    #[error("sprint speed {sprint} is below base speed {base}")]
    SprintBelowBase { sprint: f32, base: f32 },
    #[error("snow height band is inverted: min {min} above max {max}")]
    InvertedSnowBand { min: f32, max: f32 },
}

/// Every gameplay constant in one validated, file-loadable struct.
///
/// Defaults reproduce the reference behavior; partial config files override
/// only the fields they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration, units/s^2.
    pub gravity: f32,
    /// Eye height the floor clamp holds the player at.
    pub floor_height: f32,
    /// Vertical velocity set by a grounded jump, units/s.
    pub jump_impulse: f32,
    /// Walk speed, units/s.
    pub base_speed: f32,
    /// Sprint speed, units/s.
    pub sprint_speed: f32,
    /// Projectile muzzle speed, units/s.
    pub projectile_speed: f32,
    /// Projectiles farther than this from the world origin are culled.
    pub projectile_range: f32,
    /// Hard cap on live projectiles; shots past it are dropped.
    pub max_projectiles: usize,
    /// Milliseconds of simulated time between enemy spawns.
    pub spawn_interval_ms: f32,
    /// Enemies spawn with x uniform in +/- this.
    pub spawn_half_width: f32,
    /// Fixed enemy spawn height.
    pub spawn_y: f32,
    /// Fixed enemy spawn depth.
    pub spawn_z: f32,
    /// Homing speed base, units/s.
    pub enemy_speed: f32,
    /// Extra homing speed per score point, units/s. Applied at spawn.
    pub enemy_speed_per_score: f32,
    /// Hard cap on live enemies; spawns past it are dropped.
    pub max_enemies: usize,
    /// Contact distance for projectile-enemy and player-enemy tests.
    pub hit_radius: f32,
    /// Score awarded per enemy destroyed.
    pub score_per_kill: u32,
    /// Flake count for the decorative snow field.
    pub snow_count: usize,
    /// Snow volume half extent on x and z.
    pub snow_half_extent: f32,
    /// Bottom of the flake respawn band.
    pub snow_min_height: f32,
    /// Top of the flake respawn band.
    pub snow_max_height: f32,
    /// Downward flake speed, units/s.
    pub snow_fall_speed: f32,
    /// Sideways flake speed, units/s.
    pub snow_drift_speed: f32,
    /// Player spawn position (the camera eye).
    pub spawn_position: Vec3,
    /// Spawn look yaw, radians.
    pub spawn_yaw: f32,
    /// Spawn look pitch, radians.
    pub spawn_pitch: f32,
    /// Vertical field of view handed to renderers, degrees.
    pub fov_degrees: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            floor_height: 0.5,
            jump_impulse: 3.0,
            base_speed: 2.0,
            sprint_speed: 4.0,
            projectile_speed: 300.0,
            projectile_range: 100.0,
            max_projectiles: 256,
            spawn_interval_ms: 300.0,
            spawn_half_width: 10.0,
            spawn_y: 1.0,
            spawn_z: -20.0,
            enemy_speed: 50.0,
            enemy_speed_per_score: 0.01,
            max_enemies: 256,
            hit_radius: 0.6,
            score_per_kill: 10,
            snow_count: 50_000,
            snow_half_extent: 25.0,
            snow_min_height: 10.0,
            snow_max_height: 30.0,
            snow_fall_speed: 2.4,
            snow_drift_speed: 0.6,
            spawn_position: Vec3::new(4.0, 5.0, 5.0),
            spawn_yaw: -std::f32::consts::FRAC_PI_2,
            spawn_pitch: 0.0,
            fov_degrees: 75.0,
        }
    }
}

impl Tuning {
    /// Reject configurations the simulation cannot run sanely.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive: [(&'static str, f32); 7] = [
            ("gravity", self.gravity),
            ("base_speed", self.base_speed),
            ("sprint_speed", self.sprint_speed),
            ("projectile_speed", self.projectile_speed),
            ("projectile_range", self.projectile_range),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("hit_radius", self.hit_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive(name));
            }
        }
        if !(self.enemy_speed > 0.0) {
            return Err(TuningError::NonPositive("enemy_speed"));
        }

        let non_negative: [(&'static str, f32); 5] = [
            ("floor_height", self.floor_height),
            ("jump_impulse", self.jump_impulse),
            ("spawn_half_width", self.spawn_half_width),
            ("enemy_speed_per_score", self.enemy_speed_per_score),
            ("snow_fall_speed", self.snow_fall_speed),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative(name));
            }
        }

        if self.max_projectiles == 0 {
            return Err(TuningError::ZeroCap("max_projectiles"));
        }
        if self.max_enemies == 0 {
            return Err(TuningError::ZeroCap("max_enemies"));
        }
        if self.sprint_speed < self.base_speed {
            return Err(TuningError::SprintBelowBase {
                sprint: self.sprint_speed,
                base: self.base_speed,
            });
        }
        if self.snow_min_height > self.snow_max_height {
            return Err(TuningError::InvertedSnowBand {
                min: self.snow_min_height,
                max: self.snow_max_height,
            });
        }
        Ok(())
    }
}
