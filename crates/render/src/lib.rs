//! Rendering adapter: renderer-agnostic interface over session state.
//!
//! # Invariants
//! - Renderers cannot mutate session truth; they read state and a view.
//! - Every renderer handles all three phases (menu, playing, over).
//!
//! # Workaround
//! Provides a trait-based renderer interface with text and glyph-grid
//! back-ends as a workaround for a GPU scene backend. The trait is stable;
//! swap in a mesh/GPU implementation without changing consumers.

mod glyph;
mod renderer;

pub use glyph::GlyphGridRenderer;
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "frostline-render v0.1.0"
}
