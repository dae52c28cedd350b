mod screen;

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};
use tracing_subscriber::EnvFilter;

use frostline_input::{Action, InputState};
use frostline_sim::{FrameClock, GameEvent, GameSession, Phase, Tuning};

const FRAME: Duration = Duration::from_millis(33); // about 30 fps

/// Frames a key still counts as held after its last press or repeat
/// event. Terminals without key-release events show OS key repeat as
/// fresh presses at 15 Hz or faster, so a four-frame window outlives
/// the repeat gap while a key that was let go expires quickly.
const HOLD_WINDOW: u64 = 4;

/// Min frames between queued shots while the fire key is held.
const FIRE_COOLDOWN: u32 = 8;

/// Radians of look change per arrow key event.
const LOOK_STEP: f32 = 0.06;

/// Held-action bindings, synced from the key window every frame.
/// Uppercase move keys arrive when shift is down, so they double as
/// the sprint signal.
const BINDINGS: &[(Action, &[KeyCode])] = &[
    (Action::MoveForward, &[KeyCode::Char('w'), KeyCode::Char('W')]),
    (Action::MoveBack, &[KeyCode::Char('s'), KeyCode::Char('S')]),
    (Action::StrafeLeft, &[KeyCode::Char('a'), KeyCode::Char('A')]),
    (Action::StrafeRight, &[KeyCode::Char('d'), KeyCode::Char('D')]),
    (
        Action::Sprint,
        &[
            KeyCode::Char('W'),
            KeyCode::Char('A'),
            KeyCode::Char('S'),
            KeyCode::Char('D'),
        ],
    ),
    (Action::Jump, &[KeyCode::Char(' ')]),
];

#[derive(Parser)]
#[command(name = "frostline-tui", about = "Terminal front-end for frostline")]
struct Cli {
    /// Seed for the run; a fresh one is drawn when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML tuning file; fields omitted there keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Write logs here; raw mode leaves no terminal for them otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub session: GameSession,
    pub tuning: Tuning,
    pub best_score: u32,
    pub note: String,
    input: InputState,
    clock: FrameClock,
    fixed_seed: Option<u64>,
    key_frame: HashMap<KeyCode, u64>,
    fire_cooldown: u32,
    frame: u64,
}

impl App {
    fn new(fixed_seed: Option<u64>, tuning: Tuning) -> anyhow::Result<Self> {
        let seed = fixed_seed.unwrap_or_else(fresh_seed);
        let session = GameSession::with_tuning(tuning.clone(), seed)?;
        let input = InputState::with_look(tuning.spawn_yaw, tuning.spawn_pitch);
        Ok(Self {
            session,
            tuning,
            best_score: 0,
            note: String::new(),
            input,
            clock: FrameClock::new(Instant::now()),
            fixed_seed,
            key_frame: HashMap::new(),
            fire_cooldown: 0,
            frame: 0,
        })
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    fn start_run(&mut self) {
        self.input = InputState::with_look(self.tuning.spawn_yaw, self.tuning.spawn_pitch);
        self.note.clear();
        self.session.start();
    }

    /// A restart is a fresh session. A pinned seed replays the same
    /// run; otherwise every round rolls a new one.
    fn restart(&mut self) -> anyhow::Result<()> {
        let seed = self.fixed_seed.unwrap_or_else(fresh_seed);
        self.session = GameSession::with_tuning(self.tuning.clone(), seed)?;
        self.start_run();
        Ok(())
    }

    /// Sync held actions from the key window, advance one frame, and
    /// fold this frame's events into the HUD.
    fn update(&mut self, now: Instant) {
        for (action, keys) in BINDINGS {
            let live = keys.iter().any(|&k| self.is_held(k));
            if live {
                self.input.press(*action);
            } else {
                self.input.release(*action);
            }
        }
        // Shift for sprint delivers F while f is down; both cases fire.
        let fire_held = self.is_held(KeyCode::Char('f')) || self.is_held(KeyCode::Char('F'));
        if self.fire_cooldown == 0 && fire_held {
            self.input.press(Action::Fire);
            self.input.release(Action::Fire);
            self.fire_cooldown = FIRE_COOLDOWN;
        }
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        let dt = self.clock.delta(now);
        let frame_input = self.input.sample();
        self.session.tick(&frame_input, dt);

        for ev in self.session.drain_events() {
            match ev {
                GameEvent::EnemyKilled { score, .. } => {
                    self.note = format!("enemy down, score {score}");
                }
                GameEvent::GameOver { score, .. } => {
                    self.best_score = self.best_score.max(score);
                    self.note.clear();
                    self.input.release_all();
                    tracing::info!(score, "run over");
                }
                GameEvent::Started { seed } => {
                    tracing::info!(seed, "run started");
                }
                GameEvent::ProjectileFired { .. } | GameEvent::EnemySpawned { .. } => {}
            }
        }
    }

    fn handle_press(&mut self, code: KeyCode, modifiers: KeyModifiers) -> anyhow::Result<Flow> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Flow::Quit);
            }
            KeyCode::Enter if matches!(self.session.phase(), Phase::Menu) => {
                self.start_run();
            }
            KeyCode::Enter if self.session.state().is_some() => {
                // One queued shot per press; held f runs on the autofire
                // cooldown instead.
                self.input.press(Action::Fire);
                self.input.release(Action::Fire);
            }
            KeyCode::Char('r') | KeyCode::Char('R') if self.session.report().is_some() => {
                self.restart()?;
            }
            KeyCode::Left | KeyCode::Char('h') => self.input.apply_look(-LOOK_STEP, 0.0),
            KeyCode::Right | KeyCode::Char('l') => self.input.apply_look(LOOK_STEP, 0.0),
            KeyCode::Up | KeyCode::Char('k') => self.input.apply_look(0.0, -LOOK_STEP),
            KeyCode::Down | KeyCode::Char('j') => self.input.apply_look(0.0, LOOK_STEP),
            _ => {}
        }
        Ok(Flow::Continue)
    }
}

fn fresh_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
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

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    fixed_seed: Option<u64>,
    tuning: Tuning,
) -> anyhow::Result<()> {
    let mut app = App::new(fixed_seed, tuning)?;

    loop {
        let frame_start = Instant::now();
        app.frame += 1;

        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            {
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        app.key_frame.insert(code, app.frame);
                        if let Flow::Quit = app.handle_press(code, modifiers)? {
                            return Ok(());
                        }
                    }
                    // Keyboard-enhancement terminals report releases;
                    // everywhere else keys expire via the hold window.
                    KeyEventKind::Release => {
                        app.key_frame.remove(&code);
                    }
                }
            }
        }

        app.update(frame_start);
        screen::draw(out, &app)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let tuning = load_tuning(cli.tuning.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; kitty-protocol terminals honor this
    // and classic terminals fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the frame loop
    // never waits on terminal I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, cli.seed, tuning);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_app() -> App {
        let tuning = Tuning {
            snow_count: 4,
            ..Tuning::default()
        };
        let mut app = App::new(Some(1), tuning).expect("default tuning is valid");
        app.start_run();
        app
    }

    #[test]
    fn fire_key_works_shifted_and_unshifted() {
        for key in [KeyCode::Char('f'), KeyCode::Char('F')] {
            let mut app = playing_app();
            app.frame += 1;
            app.key_frame.insert(key, app.frame);
            app.update(Instant::now());
            let state = app.session.state().expect("run is live");
            assert_eq!(state.projectiles().len(), 1, "{key:?} queued no shot");
        }
    }

    #[test]
    fn autofire_waits_out_the_cooldown() {
        let mut app = playing_app();
        for _ in 0..FIRE_COOLDOWN {
            app.frame += 1;
            app.key_frame.insert(KeyCode::Char('F'), app.frame);
            app.update(Instant::now());
        }
        // One shot on the first frame; the cooldown swallows the rest.
        let pool = app.session.state().expect("run is live").projectiles().len();
        assert_eq!(pool, 1);
    }
}
