//! Tile decoding and canvas composition

/// Planned tiles to canvas
pub mod compositor;
/// Archive-backed rendering entry point
pub mod renderer;
/// Tile decoding and placeholders
pub mod tile;

pub use compositor::Compositor;
pub use renderer::{GridRenderer, RenderConfig};
