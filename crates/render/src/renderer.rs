use frostline_common::CameraPose;
use frostline_sim::{GameSession, Phase};
use glam::Vec3;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Point the eye is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    /// View looking along a camera pose.
    pub fn from_pose(pose: &CameraPose, fov_degrees: f32) -> Self {
        Self {
            eye: pose.position,
            target: pose.position + pose.forward(),
            fov_degrees,
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(4.0, 5.0, 5.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads session state and a view configuration, then produces
/// output. It never mutates the session — gameplay truth stays session-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given session and view.
    fn render(&self, session: &GameSession, view: &RenderView) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable string representation of the session state.
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, session: &GameSession, view: &RenderView) -> String {
        let mut out = String::new();
        match session.phase() {
            Phase::Menu => {
                out.push_str(&format!(
                    "=== Frostline (menu, seed={}) ===\n",
                    session.seed()
                ));
                out.push_str("Waiting for start\n");
            }
            Phase::Playing(state) => {
                out.push_str(&format!(
                    "=== Frostline (tick={}, score={}) ===\n",
                    state.tick(),
                    state.score()
                ));
                let p = state.player().position;
                out.push_str(&format!(
                    "Player: pos=({:.2}, {:.2}, {:.2}) yaw={:.2} pitch={:.2}\n",
                    p.x,
                    p.y,
                    p.z,
                    state.yaw(),
                    state.pitch()
                ));
                out.push_str(&format!(
                    "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
                    view.eye.x,
                    view.eye.y,
                    view.eye.z,
                    view.target.x,
                    view.target.y,
                    view.target.z,
                    view.fov_degrees
                ));
                out.push_str(&format!(
                    "Pools: {} projectiles, {} enemies, {} flakes\n",
                    state.projectiles().len(),
                    state.enemies().len(),
                    state.snow().len()
                ));
                for e in state.enemies().iter() {
                    out.push_str(&format!(
                        "  [E{}] pos=({:.2}, {:.2}, {:.2}) speed={:.1}\n",
                        e.id.0, e.position.x, e.position.y, e.position.z, e.speed
                    ));
                }
                for p in state.projectiles().iter() {
                    out.push_str(&format!(
                        "  [P{}] pos=({:.2}, {:.2}, {:.2})\n",
                        p.id.0, p.position.x, p.position.y, p.position.z
                    ));
                }
            }
            Phase::Over(report) => {
                out.push_str("=== Frostline (game over) ===\n");
                out.push_str(&format!(
                    "Score: {} ({} kills, {:.1}s, {} ticks)\n",
                    report.score, report.kills, report.elapsed, report.ticks
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostline_common::FrameInput;
    use frostline_sim::{TickOutcome, Tuning};

    fn small_tuning() -> Tuning {
        Tuning {
            snow_count: 8,
            spawn_half_width: 0.0,
            spawn_position: Vec3::new(0.0, 0.5, 0.0),
            ..Tuning::default()
        }
    }

    #[test]
    fn menu_renders_seed_line() {
        let session = GameSession::new(9);
        let output = DebugTextRenderer::new().render(&session, &RenderView::default());
        assert!(output.contains("menu"));
        assert!(output.contains("seed=9"));
    }

    #[test]
    fn playing_renders_state_and_pools() {
        let mut session = GameSession::with_tuning(small_tuning(), 1).unwrap();
        session.start();
        let fire = FrameInput {
            shots: 1,
            ..FrameInput::default()
        };
        session.tick(&fire, 0.016);

        let view = RenderView::from_pose(
            &session.state().unwrap().camera_pose(),
            session.tuning().fov_degrees,
        );
        let output = DebugTextRenderer::new().render(&session, &view);
        assert!(output.contains("tick=1"));
        assert!(output.contains("score=0"));
        assert!(output.contains("1 projectiles"));
        assert!(output.contains("fov=75"));
    }

    #[test]
    fn game_over_renders_final_score() {
        let mut session = GameSession::with_tuning(small_tuning(), 3).unwrap();
        session.start();
        let input = FrameInput::default();
        for _ in 0..200 {
            if session.tick(&input, 0.016) == TickOutcome::Ended {
                break;
            }
        }
        assert!(session.report().is_some());

        let output = DebugTextRenderer::new().render(&session, &RenderView::default());
        assert!(output.contains("game over"));
        assert!(output.contains("Score: 0"));
    }

    #[test]
    fn render_view_default_matches_spawn_camera() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 75.0);
        assert_eq!(view.eye, Vec3::new(4.0, 5.0, 5.0));
    }

    #[test]
    fn view_from_pose_looks_along_forward() {
        let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), 0.5, 0.2);
        let view = RenderView::from_pose(&pose, 75.0);
        assert_eq!(view.eye, pose.position);
        assert!((view.target - pose.position - pose.forward()).length() < 1e-6);
    }
}
