//! Grid planning and canvas layout
//!
//! This module contains spatial-related functionality including:
//! - Seed range and grid shape validation
//! - Row-major seed planning
//! - Canvas storage and block placement

/// Composed canvas and block provenance
pub mod canvas;
/// Seed range, grid shape and seed planning
pub mod grid;

pub use canvas::{Canvas, TileOrigin};
pub use grid::{GridSpec, Pages, PlannedTile, SeedRange, block_position, plan};
