//! Grid composition from planned seeds
//!
//! Walks the planned seeds in order, resolving each to a decoded archive image
//! or a placeholder, and copies the result into its block on the canvas. A
//! render either produces a complete canvas or fails on the first corrupt
//! entry; out-of-range and missing seeds never fail.

use crate::archive::TileSource;
use crate::compose::tile::{decode_tile, placeholder_tile};
use crate::io::configuration::MAX_TILE_SIZE;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{Canvas, GridSpec, PlannedTile, TileOrigin};
use ndarray::Array3;

/// Assembles planned tiles into a canvas
#[derive(Debug, Clone)]
pub struct Compositor {
    tile_size: usize,
    placeholder: Array3<u8>,
}

impl Compositor {
    /// Create a compositor producing blocks of `tile_size` pixels
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or above [`MAX_TILE_SIZE`]
    pub fn new(tile_size: usize) -> Result<Self> {
        if !(1..=MAX_TILE_SIZE).contains(&tile_size) {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &format!("must be between 1 and {MAX_TILE_SIZE}"),
            ));
        }
        Ok(Self {
            tile_size,
            placeholder: placeholder_tile(tile_size),
        })
    }

    /// Edge length of each block in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Compose `planned` into a canvas shaped by `grid`
    ///
    /// # Errors
    ///
    /// Returns an error if the plan length disagrees with the grid, or an
    /// archive entry cannot be read or decoded
    pub fn compose<S>(
        &self,
        planned: &[PlannedTile],
        grid: &GridSpec,
        source: &mut S,
    ) -> Result<Canvas>
    where
        S: TileSource + ?Sized,
    {
        self.compose_observed(planned, grid, source, |_, _| {})
    }

    /// Compose like [`Self::compose`], reporting each placed block to `observe`
    ///
    /// # Errors
    ///
    /// Same as [`Self::compose`]
    pub fn compose_observed<S, F>(
        &self,
        planned: &[PlannedTile],
        grid: &GridSpec,
        source: &mut S,
        mut observe: F,
    ) -> Result<Canvas>
    where
        S: TileSource + ?Sized,
        F: FnMut(usize, TileOrigin),
    {
        if planned.len() != grid.tile_count() {
            return Err(invalid_parameter(
                "planned",
                &planned.len(),
                &format!(
                    "a {}x{} grid needs {} tiles",
                    grid.rows(),
                    grid.cols(),
                    grid.tile_count()
                ),
            ));
        }

        let mut canvas = Canvas::blank(grid.rows(), grid.cols(), self.tile_size);

        for (index, tile) in planned.iter().enumerate() {
            let (origin, decoded) = self.resolve(tile, source)?;
            let pixels = decoded.as_ref().unwrap_or(&self.placeholder);
            canvas.place(index, pixels.view(), origin)?;
            observe(index, origin);
        }

        debug_assert!(canvas.is_complete());
        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            start_seed = grid.start_seed(),
            placeholders = canvas.placeholder_count(),
            "composed canvas"
        );
        Ok(canvas)
    }

    // Placeholders are reported as `None` so the shared tile is not cloned
    fn resolve<S>(
        &self,
        tile: &PlannedTile,
        source: &mut S,
    ) -> Result<(TileOrigin, Option<Array3<u8>>)>
    where
        S: TileSource + ?Sized,
    {
        if !tile.in_range {
            return Ok((TileOrigin::OutOfRange, None));
        }

        match source.fetch(tile.seed)? {
            Some(bytes) => {
                let key = source.describe(tile.seed);
                let decoded = decode_tile(&bytes, self.tile_size, &key)?;
                Ok((TileOrigin::Archive, Some(decoded)))
            }
            None => {
                tracing::warn!(
                    seed = tile.seed,
                    key = %source.describe(tile.seed),
                    "archive entry missing, using placeholder"
                );
                Ok((TileOrigin::MissingEntry, None))
            }
        }
    }
}
