use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use frostline_common::{CameraPose, EntityId, FrameInput, IdAllocator};
use glam::Vec3;

use crate::collision;
use crate::config::{Tuning, TuningError};
use crate::enemy::{EnemyPool, Spawner};
use crate::player::PlayerState;
use crate::projectile::ProjectilePool;
use crate::rng::GameRng;
use crate::snow::SnowField;

/// An event record produced by notable moments in a run.
///
/// Front-ends read these off the session to drive HUD updates and
/// screen transitions without diffing state between frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run left the menu.
    Started { seed: u64 },
    /// A projectile left the eye point.
    ProjectileFired { id: EntityId },
    /// An enemy entered on the far band.
    EnemySpawned { id: EntityId, position: Vec3 },
    /// A projectile removed an enemy. Carries the score after the kill.
    EnemyKilled {
        projectile: EntityId,
        enemy: EntityId,
        score: u32,
    },
    /// An enemy reached the player; the run is over.
    GameOver { score: u32, elapsed: f32 },
}

/// What a single `tick` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing advanced: the session was not in `Playing`.
    Idle,
    /// The run advanced and continues.
    Advanced,
    /// The run advanced and ended on this tick.
    Ended,
}

/// Lifecycle of a session. `Over` is terminal: a restart is a fresh
/// `GameSession`, never a resurrection of this one.
#[derive(Debug, Clone)]
pub enum Phase {
    Menu,
    Playing(RunState),
    Over(GameReport),
}

/// Terminal summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub score: u32,
    pub kills: u32,
    pub elapsed: f32,
    pub ticks: u64,
}

/// Mutable state of an in-flight run. Owned by `Phase::Playing`; all
/// mutation happens inside `GameSession::tick`.
#[derive(Debug, Clone)]
pub struct RunState {
    tick: u64,
    elapsed: f32,
    score: u32,
    kills: u32,
    player: PlayerState,
    yaw: f32,
    pitch: f32,
    projectiles: ProjectilePool,
    enemies: EnemyPool,
    spawner: Spawner,
    snow: SnowField,
    rng: GameRng,
    ids: IdAllocator,
}

impl RunState {
    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds since the run started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// The eye pose renderers should draw from. The eye sits at the
    /// player position itself; the floor clamp height is the standing
    /// eye height.
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose::new(self.player.position, self.yaw, self.pitch)
    }

    pub fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    pub fn enemies(&self) -> &EnemyPool {
        &self.enemies
    }

    pub fn snow(&self) -> &SnowField {
        &self.snow
    }

    fn mix_into(&self, h: &mut u64) {
        mix(h, &self.tick.to_le_bytes());
        mix(h, &self.elapsed.to_le_bytes());
        mix(h, &self.score.to_le_bytes());
        mix(h, &self.kills.to_le_bytes());
        mix(h, &self.player.position.x.to_le_bytes());
        mix(h, &self.player.position.y.to_le_bytes());
        mix(h, &self.player.position.z.to_le_bytes());
        mix(h, &self.player.vertical_velocity.to_le_bytes());
        mix(h, &[self.player.can_jump as u8, self.player.is_sprinting as u8]);
        mix(h, &self.yaw.to_le_bytes());
        mix(h, &self.pitch.to_le_bytes());
        mix(h, &self.rng.state().to_le_bytes());
        mix(h, &self.ids.issued().to_le_bytes());
        mix(h, &self.spawner.pending_ms().to_le_bytes());
        for p in self.projectiles.iter() {
            mix(h, &p.id.0.to_le_bytes());
            mix(h, &p.position.x.to_le_bytes());
            mix(h, &p.position.y.to_le_bytes());
            mix(h, &p.position.z.to_le_bytes());
            mix(h, &p.velocity.x.to_le_bytes());
            mix(h, &p.velocity.y.to_le_bytes());
            mix(h, &p.velocity.z.to_le_bytes());
        }
        for e in self.enemies.iter() {
            mix(h, &e.id.0.to_le_bytes());
            mix(h, &e.position.x.to_le_bytes());
            mix(h, &e.position.y.to_le_bytes());
            mix(h, &e.position.z.to_le_bytes());
            mix(h, &e.speed.to_le_bytes());
        }
        for f in self.snow.flakes() {
            mix(h, &f.x.to_le_bytes());
            mix(h, &f.y.to_le_bytes());
            mix(h, &f.z.to_le_bytes());
        }
    }
}

/// One seeded play session from menu to game over.
///
/// The session owns the truth; front-ends feed it one `FrameInput` per
/// frame and draw from its state. Given the same seed, tuning, and
/// input sequence, every tick reproduces identical state on every
/// platform. Pool iteration stays in insertion order, so resolution
/// order never depends on memory layout.
#[derive(Debug, Clone)]
pub struct GameSession {
    tuning: Tuning,
    seed: u64,
    phase: Phase,
    /// Append-only log of notable moments, drained by the front-end.
    event_log: Vec<GameEvent>,
}

impl GameSession {
    /// Session with default tuning, waiting in the menu.
    pub fn new(seed: u64) -> Self {
        Self {
            tuning: Tuning::default(),
            seed,
            phase: Phase::Menu,
            event_log: Vec::new(),
        }
    }

    /// Session with custom tuning. Rejects tunings that break the
    /// simulation's assumptions.
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            seed,
            phase: Phase::Menu,
            event_log: Vec::new(),
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The in-flight run, when playing.
    pub fn state(&self) -> Option<&RunState> {
        match &self.phase {
            Phase::Playing(state) => Some(state),
            _ => None,
        }
    }

    /// The terminal report, once the run has ended.
    pub fn report(&self) -> Option<&GameReport> {
        match &self.phase {
            Phase::Over(report) => Some(report),
            _ => None,
        }
    }

    /// Leave the menu and begin the run. Returns false (and changes
    /// nothing) outside the menu.
    pub fn start(&mut self) -> bool {
        if !matches!(self.phase, Phase::Menu) {
            tracing::debug!("start ignored outside the menu");
            return false;
        }
        let mut rng = GameRng::new(self.seed);
        let snow = SnowField::new(&mut rng, &self.tuning);
        self.phase = Phase::Playing(RunState {
            tick: 0,
            elapsed: 0.0,
            score: 0,
            kills: 0,
            player: PlayerState::spawn(&self.tuning),
            yaw: self.tuning.spawn_yaw,
            pitch: self.tuning.spawn_pitch,
            projectiles: ProjectilePool::new(),
            enemies: EnemyPool::new(),
            spawner: Spawner::new(),
            snow,
            rng,
            ids: IdAllocator::new(),
        });
        self.event_log.push(GameEvent::Started { seed: self.seed });
        tracing::info!(seed = self.seed, "run started");
        true
    }

    /// Advance the run by one frame of simulated time.
    ///
    /// Order within a tick: look and queued edges are ingested first
    /// (shots leave from the pose the previous tick ended in), then the
    /// player integrates, then snow, projectiles, spawns, and enemies
    /// advance, and contacts resolve last. Enemies home on the position
    /// the player reached this tick.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) -> TickOutcome {
        let Phase::Playing(state) = &mut self.phase else {
            return TickOutcome::Idle;
        };
        let tuning = &self.tuning;
        let events = &mut self.event_log;
        // Negative, NaN, and infinite deltas all advance nothing.
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        state.tick += 1;
        state.elapsed += dt;
        let _span = tracing::info_span!("session_tick", tick = state.tick).entered();

        // Look is absolute: the input layer owns accumulation, the
        // session only enforces the pitch range.
        state.yaw = input.yaw;
        state.pitch = input.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
        let pose = CameraPose::new(state.player.position, state.yaw, state.pitch);

        for _ in 0..input.shots {
            if let Some(id) = state.projectiles.fire(&pose, &mut state.ids, tuning) {
                events.push(GameEvent::ProjectileFired { id });
            }
        }
        if input.jump {
            state.player.apply_jump(tuning);
        }

        state.player.apply_movement(input, &pose, tuning, dt);
        state.player.integrate_gravity(tuning, dt);
        state.player.clamp_to_floor(tuning);

        state.snow.advance(&mut state.rng, tuning, dt);
        state.projectiles.advance(tuning, dt);

        state.spawner.accrue(dt);
        while state.spawner.take_due(tuning) {
            if let Some(enemy) =
                state
                    .enemies
                    .spawn(&mut state.ids, &mut state.rng, tuning, state.score)
            {
                events.push(GameEvent::EnemySpawned {
                    id: enemy.id,
                    position: enemy.position,
                });
            }
        }
        state.enemies.advance(state.player.position, dt);

        let outcome = collision::resolve(
            &mut state.projectiles,
            &mut state.enemies,
            state.player.position,
            tuning,
        );
        for &(projectile, enemy) in &outcome.kills {
            state.score += tuning.score_per_kill;
            state.kills += 1;
            events.push(GameEvent::EnemyKilled {
                projectile,
                enemy,
                score: state.score,
            });
        }

        if outcome.player_hit {
            let report = GameReport {
                score: state.score,
                kills: state.kills,
                elapsed: state.elapsed,
                ticks: state.tick,
            };
            events.push(GameEvent::GameOver {
                score: report.score,
                elapsed: report.elapsed,
            });
            tracing::info!(score = report.score, ticks = report.ticks, "run ended");
            self.phase = Phase::Over(report);
            return TickOutcome::Ended;
        }

        tracing::debug!(
            enemies = state.enemies.len(),
            projectiles = state.projectiles.len(),
            "tick complete"
        );
        TickOutcome::Advanced
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[GameEvent] {
        &self.event_log
    }

    /// Compute a deterministic hash of the session state for
    /// comparison. Covers every field that influences future ticks;
    /// the event log is transient and excluded.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        mix(&mut h, &self.seed.to_le_bytes());
        match &self.phase {
            Phase::Menu => mix(&mut h, &[0]),
            Phase::Playing(state) => {
                mix(&mut h, &[1]);
                state.mix_into(&mut h);
            }
            Phase::Over(report) => {
                mix(&mut h, &[2]);
                mix(&mut h, &report.score.to_le_bytes());
                mix(&mut h, &report.kills.to_le_bytes());
                mix(&mut h, &report.elapsed.to_le_bytes());
                mix(&mut h, &report.ticks.to_le_bytes());
            }
        }
        h
    }
}

/// FNV-1a over little-endian bytes, reproducible across platforms
/// without depending on floating-point ordering.
fn mix(h: &mut u64, bytes: &[u8]) {
    for &b in bytes {
        *h ^= b as u64;
        *h = h.wrapping_mul(0x0100_0000_01b3);
    }
}
