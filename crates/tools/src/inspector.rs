use frostline_common::EntityId;
use frostline_sim::{GameSession, Phase};
use serde::Serialize;

/// Session inspector for developer tooling.
///
/// Provides read-only queries against session state for debugging,
/// replay verification, and development UI.
pub struct SessionInspector;

impl SessionInspector {
    /// Produce a summary of the session state.
    ///
    /// Works in every phase: menu and game-over summaries carry zeros
    /// for the fields that only exist mid-run.
    pub fn summary(session: &GameSession) -> SessionSummary {
        let mut summary = SessionSummary {
            phase: "menu",
            seed: session.seed(),
            tick: 0,
            elapsed: 0.0,
            score: 0,
            kills: 0,
            projectiles: 0,
            enemies: 0,
            snow: 0,
            pending_events: session.events().len(),
            state_hash: format!("{:016x}", session.state_hash()),
        };
        match session.phase() {
            Phase::Menu => {}
            Phase::Playing(state) => {
                summary.phase = "playing";
                summary.tick = state.tick();
                summary.elapsed = state.elapsed();
                summary.score = state.score();
                summary.kills = state.kills();
                summary.projectiles = state.projectiles().len();
                summary.enemies = state.enemies().len();
                summary.snow = state.snow().len();
            }
            Phase::Over(report) => {
                summary.phase = "over";
                summary.tick = report.ticks;
                summary.elapsed = report.elapsed;
                summary.score = report.score;
                summary.kills = report.kills;
            }
        }
        summary
    }

    /// List live enemies with their current distance to the player.
    /// Empty outside the playing phase.
    pub fn enemies(session: &GameSession) -> Vec<EnemyInfo> {
        let Some(state) = session.state() else {
            return Vec::new();
        };
        let eye = state.player().position;
        state
            .enemies()
            .iter()
            .map(|e| EnemyInfo {
                id: e.id,
                position: [e.position.x, e.position.y, e.position.z],
                speed: e.speed,
                distance: e.position.distance(eye),
            })
            .collect()
    }
}

/// Summary of session state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub phase: &'static str,
    pub seed: u64,
    pub tick: u64,
    pub elapsed: f32,
    pub score: u32,
    pub kills: u32,
    pub projectiles: usize,
    pub enemies: usize,
    pub snow: usize,
    pub pending_events: usize,
    pub state_hash: String,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: phase={} seed={} tick={} score={} kills={} enemies={} projectiles={} hash={}",
            self.phase,
            self.seed,
            self.tick,
            self.score,
            self.kills,
            self.enemies,
            self.projectiles,
            self.state_hash,
        )
    }
}

/// Detailed info about a single live enemy.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnemyInfo {
    pub id: EntityId,
    pub position: [f32; 3],
    pub speed: f32,
    pub distance: f32,
}

impl std::fmt::Display for EnemyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Enemy [{}] pos=({:.2}, {:.2}, {:.2}) speed={:.1} dist={:.2}",
            self.id.0,
            self.position[0],
            self.position[1],
            self.position[2],
            self.speed,
            self.distance,
        )
    }
}
