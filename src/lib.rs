//! Tiled previews of seed-indexed image archives
//!
//! Given a start seed and a grid shape, the renderer plans the consecutive
//! seeds to show, fetches each image from an indexed tar archive, and composes
//! the decoded tiles row-major into a single bitmap. Seeds outside the dataset
//! range, or missing from the archive, are shown as solid white placeholders.

#![deny(unsafe_code)]

/// Indexed random access to the packed image archive
pub mod archive;
/// Tile decoding, placeholders and canvas composition
pub mod compose;
/// Input/output operations, configuration and error handling
pub mod io;
/// Seed planning and canvas layout
pub mod spatial;

pub use compose::{Compositor, GridRenderer, RenderConfig};
pub use io::error::{Result, ViewerError};
pub use spatial::{Canvas, GridSpec, SeedRange, TileOrigin};
