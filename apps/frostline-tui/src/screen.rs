//! Terminal drawing: all raw terminal I/O lives here.
//!
//! Each function takes a mutable writer and an immutable view of the
//! app. No game logic happens in this module; it only translates
//! session state into terminal commands.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use frostline_render::{GlyphGridRenderer, RenderView, Renderer};
use frostline_sim::{GameReport, Phase, RunState};

use crate::App;

const C_HUD: Color = Color::Yellow;
const C_TITLE: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_SHOT: Color = Color::Cyan;
const C_SNOW: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;
const C_OVER: Color = Color::Red;

/// Render one complete frame.
pub fn draw<W: Write>(out: &mut W, app: &App) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;

    match app.session.phase() {
        Phase::Menu => draw_menu(out, app, width, height)?,
        Phase::Playing(state) => draw_playing(out, app, state, width, height)?,
        Phase::Over(report) => draw_over(out, app, report, width, height)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    cx: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, app: &App, width: u16, height: u16) -> std::io::Result<()> {
    let lines = GlyphGridRenderer::default().render(&app.session, &RenderView::default());
    let cx = width / 2;
    let start = (height / 2).saturating_sub(lines.len() as u16 / 2 + 2);

    for (i, line) in lines.iter().enumerate() {
        let color = if i == 0 { C_TITLE } else { Color::White };
        print_centered(out, cx, start + i as u16, line, color)?;
    }
    let below = start + lines.len() as u16;
    if app.best_score > 0 {
        let best = format!("best score {}", app.best_score);
        print_centered(out, cx, below + 1, &best, C_HUD)?;
    }
    print_centered(out, cx, below + 3, "ENTER : Start   Q : Quit", C_HINT)?;
    Ok(())
}

fn draw_playing<W: Write>(
    out: &mut W,
    app: &App,
    state: &RunState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    // HUD row: score left, clock centered, best right
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score: {:>6}   Kills: {}",
        state.score(),
        state.kills()
    )))?;

    let clock = format!("{:.1}s", state.elapsed());
    let mx = (width / 2).saturating_sub(clock.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&clock))?;

    let best = format!("Best: {}", app.best_score);
    let rx = width.saturating_sub(best.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&best))?;

    // Arena window, centered on the player
    let grid_height = height.saturating_sub(3) as usize;
    let grid = GlyphGridRenderer::new(width as usize, grid_height, app.tuning.snow_half_extent);
    let view = RenderView::from_pose(&state.camera_pose(), app.tuning.fov_degrees);
    for (i, row) in grid.render(&app.session, &view).iter().enumerate() {
        print_grid_row(out, 0, 1 + i as u16, row)?;
    }

    // Status row above the hint line
    let status = format!(
        "yaw {:+.2}  pitch {:+.2}   {}",
        state.yaw(),
        state.pitch(),
        app.note
    );
    out.queue(cursor::MoveTo(1, height.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(&status))?;

    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "WASD : Move (shift sprints)   Arrows : Look   F : Fire   SPACE : Jump   Q : Quit",
    ))?;
    Ok(())
}

fn draw_over<W: Write>(
    out: &mut W,
    app: &App,
    report: &GameReport,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let lines = GlyphGridRenderer::default().render(&app.session, &RenderView::default());
    let cx = width / 2;
    let start = (height / 2).saturating_sub(lines.len() as u16 / 2 + 1);

    for (i, line) in lines.iter().enumerate() {
        let color = if i == 0 { C_OVER } else { C_HUD };
        print_centered(out, cx, start + i as u16, line, color)?;
    }
    let below = start + lines.len() as u16;
    if report.score > 0 && report.score >= app.best_score {
        print_centered(out, cx, below + 1, "new best!", C_HUD)?;
    }
    print_centered(out, cx, below + 2, "R : Play Again   Q : Quit", Color::White)?;
    Ok(())
}

fn glyph_color(c: char) -> Color {
    match c {
        '@' => C_PLAYER,
        'E' => C_ENEMY,
        '*' => C_SHOT,
        '.' => C_SNOW,
        _ => Color::Reset,
    }
}

/// Print one grid row, batching runs of same-colored glyphs.
fn print_grid_row<W: Write>(out: &mut W, col: u16, row: u16, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    let mut run = String::new();
    let mut color = Color::Reset;
    for c in text.chars() {
        let next = glyph_color(c);
        if next != color && !run.is_empty() {
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(run.as_str()))?;
            run.clear();
        }
        color = next;
        run.push(c);
    }
    if !run.is_empty() {
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(run.as_str()))?;
    }
    Ok(())
}
