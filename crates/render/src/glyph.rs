use frostline_sim::{GameSession, Phase, RunState};
use glam::Vec3;

use crate::renderer::{RenderView, Renderer};

/// Top-down glyph-grid renderer for terminal front-ends.
///
/// Projects the scene onto the ground plane inside a square window
/// centered on the view eye: `@` player, `E` enemies, `*` projectiles,
/// `.` snow. The top row faces -z, where enemies come from. Anything
/// outside the window is clipped.
#[derive(Debug, Clone)]
pub struct GlyphGridRenderer {
    width: usize,
    height: usize,
    half_extent: f32,
}

impl GlyphGridRenderer {
    pub fn new(width: usize, height: usize, half_extent: f32) -> Self {
        Self {
            width: width.max(3),
            height: height.max(3),
            half_extent,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn cell(&self, eye: Vec3, p: Vec3) -> Option<(usize, usize)> {
        let span = self.half_extent * 2.0;
        let fx = (p.x - eye.x + self.half_extent) / span;
        let fz = (p.z - eye.z + self.half_extent) / span;
        if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fz) {
            return None;
        }
        let col = ((fx * self.width as f32) as usize).min(self.width - 1);
        let row = ((fz * self.height as f32) as usize).min(self.height - 1);
        Some((col, row))
    }

    fn scene(&self, state: &RunState, view: &RenderView) -> Vec<String> {
        let mut grid = vec![vec![' '; self.width]; self.height];
        let eye = view.eye;
        let mut clipped = 0usize;

        for f in state.snow().flakes() {
            match self.cell(eye, *f) {
                Some((c, r)) => grid[r][c] = '.',
                None => clipped += 1,
            }
        }
        for p in state.projectiles().iter() {
            match self.cell(eye, p.position) {
                Some((c, r)) => grid[r][c] = '*',
                None => clipped += 1,
            }
        }
        for e in state.enemies().iter() {
            match self.cell(eye, e.position) {
                Some((c, r)) => grid[r][c] = 'E',
                None => clipped += 1,
            }
        }
        if let Some((c, r)) = self.cell(eye, state.player().position) {
            grid[r][c] = '@';
        }
        if clipped > 0 {
            tracing::trace!(clipped, "plotted entities outside the glyph window");
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

impl Default for GlyphGridRenderer {
    fn default() -> Self {
        // Window matches the snow band footprint.
        Self::new(48, 24, 25.0)
    }
}

impl Renderer for GlyphGridRenderer {
    type Output = Vec<String>;

    fn render(&self, session: &GameSession, view: &RenderView) -> Vec<String> {
        match session.phase() {
            Phase::Menu => vec![
                "FROSTLINE".to_string(),
                String::new(),
                "Snowbound arena shooter".to_string(),
                format!("seed {}", session.seed()),
            ],
            Phase::Playing(state) => self.scene(state, view),
            Phase::Over(report) => vec![
                "GAME OVER".to_string(),
                String::new(),
                format!("final score {}", report.score),
                format!("{} kills in {:.1}s", report.kills, report.elapsed),
            ],
        }
    }
}
