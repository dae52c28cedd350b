use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use frostline_common::FrameInput;
use frostline_render::{DebugTextRenderer, RenderView, Renderer};
use frostline_sim::{GameEvent, GameSession, TickOutcome, Tuning};
use frostline_tools::SessionInspector;

#[derive(Parser)]
#[command(name = "frostline-cli", about = "Headless driver for frostline sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run one scripted session and print the outcome
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Seed for the run
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Simulated milliseconds per tick
        #[arg(long, default_value = "16")]
        dt_ms: f32,
        /// YAML tuning file; fields omitted there keep their defaults
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Fire one shot every N ticks (0 disables)
        #[arg(long, default_value = "30")]
        fire_every: u64,
        /// Emit the final summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the same scripted session twice and compare state hashes
    Verify {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Seed for both runs
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Simulated milliseconds per tick
        #[arg(long, default_value = "16")]
        dt_ms: f32,
    },
}

/// Deterministic input script: wander, sprint in bursts, sweep the
/// look around, and fire on a fixed cadence.
fn scripted(n: u64, fire_every: u64, tuning: &Tuning) -> FrameInput {
    FrameInput {
        move_axis: Vec2::new(
            if n % 7 < 3 { 1.0 } else { 0.0 },
            if n % 5 < 2 { -1.0 } else { 1.0 },
        ),
        sprint: n % 11 < 5,
        jump: n % 37 == 0,
        shots: u32::from(fire_every > 0 && n % fire_every == 0),
        yaw: tuning.spawn_yaw + n as f32 * 0.01,
        pitch: (n as f32 * 0.005).sin() * 0.25,
    }
}

fn load_tuning(path: Option<&Path>) -> anyhow::Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    let tuning = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing tuning file {}", path.display()))?;
    Ok(tuning)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("frostline-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("sim: {}", SessionInspector::summary(&GameSession::new(0)));
            println!("render: {}", frostline_render::crate_info());
            println!("tools: {}", frostline_tools::crate_info());
            println!("input: {}", frostline_input::crate_info());
            println!();
            println!("default tuning (override with simulate --tuning FILE):");
            print!("{}", serde_yaml::to_string(&Tuning::default())?);
        }
        Commands::Simulate {
            ticks,
            seed,
            dt_ms,
            tuning,
            fire_every,
            json,
        } => {
            let tuning = load_tuning(tuning.as_deref())?;
            let mut session = GameSession::with_tuning(tuning.clone(), seed)?;
            session.start();

            let dt = dt_ms / 1000.0;
            let mut fired = 0usize;
            let mut spawned = 0usize;
            let mut killed = 0usize;
            let mut ran = 0;
            for n in 1..=ticks {
                let outcome = session.tick(&scripted(n, fire_every, &tuning), dt);
                for event in session.drain_events() {
                    match event {
                        GameEvent::ProjectileFired { .. } => fired += 1,
                        GameEvent::EnemySpawned { .. } => spawned += 1,
                        GameEvent::EnemyKilled { .. } => killed += 1,
                        GameEvent::Started { .. } | GameEvent::GameOver { .. } => {}
                    }
                }
                ran = n;
                if outcome == TickOutcome::Ended {
                    break;
                }
            }

            let summary = SessionInspector::summary(&session);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Simulate: seed={seed}, dt={dt_ms}ms, ran {ran} ticks");
                println!("{summary}");
                println!("events: fired={fired} spawned={spawned} killed={killed}");
                let view = session
                    .state()
                    .map(|s| RenderView::from_pose(&s.camera_pose(), tuning.fov_degrees))
                    .unwrap_or_default();
                println!("{}", DebugTextRenderer.render(&session, &view));
            }
        }
        Commands::Verify { ticks, seed, dt_ms } => {
            println!("Determinism check: seed={seed}, ticks={ticks}");

            let tuning = Tuning::default();
            let mut a = GameSession::with_tuning(tuning.clone(), seed)?;
            let mut b = GameSession::with_tuning(tuning.clone(), seed)?;
            a.start();
            b.start();

            let dt = dt_ms / 1000.0;
            let mut divergence = None;
            for n in 1..=ticks {
                let input = scripted(n, 30, &tuning);
                let outcome_a = a.tick(&input, dt);
                let outcome_b = b.tick(&input, dt);
                if outcome_a != outcome_b || a.state_hash() != b.state_hash() {
                    divergence = Some(n);
                    break;
                }
                if outcome_a == TickOutcome::Ended {
                    break;
                }
            }
            let events_match = a.drain_events() == b.drain_events();

            println!("Run A: {}", SessionInspector::summary(&a));
            println!("Run B: {}", SessionInspector::summary(&b));
            match divergence {
                Some(n) => {
                    println!("Match: MISMATCH");
                    anyhow::bail!("state hashes diverged at tick {n}");
                }
                None if !events_match => {
                    println!("Match: MISMATCH");
                    anyhow::bail!("event logs diverged");
                }
                None => println!("Match: OK"),
            }
        }
    }

    Ok(())
}
