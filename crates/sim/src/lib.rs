//! Game kernel: seeded session state, fixed-order ticking, deterministic
//! replay of a whole run from seed + inputs.
//!
//! # Invariants
//! - A tick is pure with respect to its `FrameInput` and `dt`; the only
//!   entropy is the session seed.
//! - All state mutations flow through `GameSession::tick` and `start`.
//! - `Phase::Over` is terminal; a restart is a new session.

pub mod clock;
pub mod collision;
pub mod config;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod rng;
pub mod session;
pub mod snow;

pub use clock::FrameClock;
pub use config::{Tuning, TuningError};
pub use session::{GameEvent, GameReport, GameSession, Phase, RunState, TickOutcome};
