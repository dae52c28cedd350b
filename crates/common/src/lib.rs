//! Shared types for the frostline game core.
//!
//! # Invariants
//! - Entity ids are allocated sequentially and never reused within one game.
//! - Camera math treats +Y as up; degenerate look directions flatten to zero
//!   instead of propagating NaN.

pub mod camera;
pub mod types;

pub use camera::CameraPose;
pub use types::{EntityId, FrameInput, IdAllocator};
