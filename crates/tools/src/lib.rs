//! Developer tooling: session inspector and machine-readable summaries.
//!
//! # Invariants
//! - Tools are read-only over session state and first-class tested.

pub mod inspector;

pub use inspector::{EnemyInfo, SessionInspector, SessionSummary};

pub fn crate_info() -> &'static str {
    "frostline-tools v0.1.0"
}
