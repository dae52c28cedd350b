//! Input layer: logical actions and per-tick sampling.
//!
//! # Invariants
//! - The simulation consumes sampled `FrameInput`, never raw key events.
//! - Jump and fire are edge events: a held jump queues once, every
//!   distinct fire press queues one shot.
//! - Pitch never leaves [-pi/2, pi/2].

pub mod action;
pub mod state;

pub use action::Action;
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "frostline-input v0.1.0"
}
