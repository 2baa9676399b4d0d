//! Composed canvas storage with per-block provenance

use crate::io::configuration::CHANNELS;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::block_position;
use image::RgbImage;
use ndarray::{Array3, ArrayView3, s};

/// Where the pixels of a canvas block came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileOrigin {
    /// Decoded from the archive entry for the block's seed
    Archive,
    /// Placeholder: seed lies outside the dataset's seed range
    OutOfRange,
    /// Placeholder: seed is in range but the archive has no entry for it
    MissingEntry,
}

impl TileOrigin {
    /// Whether the block holds a placeholder rather than a real image
    pub const fn is_placeholder(self) -> bool {
        !matches!(self, Self::Archive)
    }
}

/// Bitmap of `rows x cols` square blocks, stored as `(height, width, channel)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Array3<u8>,
    rows: usize,
    cols: usize,
    tile_size: usize,
    origins: Vec<Option<TileOrigin>>,
}

impl Canvas {
    /// Create an unfilled canvas sized for `rows x cols` blocks
    pub fn blank(rows: usize, cols: usize, tile_size: usize) -> Self {
        Self {
            pixels: Array3::zeros((rows * tile_size, cols * tile_size, CHANNELS)),
            rows,
            cols,
            tile_size,
            origins: vec![None; rows * cols],
        }
    }

    /// Copy `tile` into the block for the `index`-th seed of the grid
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is past the last block or the tile shape
    /// differs from `(tile_size, tile_size, 3)`
    pub fn place(
        &mut self,
        index: usize,
        tile: ArrayView3<'_, u8>,
        origin: TileOrigin,
    ) -> Result<()> {
        let expected = (self.tile_size, self.tile_size, CHANNELS);
        if tile.dim() != expected {
            return Err(invalid_parameter(
                "tile",
                &format!("{:?}", tile.dim()),
                &format!("tile shape must be {expected:?}"),
            ));
        }

        let slot = self.origins.get_mut(index).ok_or_else(|| {
            invalid_parameter(
                "index",
                &index,
                &format!("canvas holds {} blocks", self.rows * self.cols),
            )
        })?;
        *slot = Some(origin);

        let (row, col) = block_position(index, self.cols);
        let (top, left) = (row * self.tile_size, col * self.tile_size);
        self.pixels
            .slice_mut(s![
                top..top + self.tile_size,
                left..left + self.tile_size,
                ..
            ])
            .assign(&tile);
        Ok(())
    }

    /// Whether every block has been placed
    pub fn is_complete(&self) -> bool {
        self.origins.iter().all(Option::is_some)
    }

    /// Pixel array shaped `(rows * tile_size, cols * tile_size, 3)`
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// Canvas shape as `(height, width, channels)`
    pub fn dimensions(&self) -> (usize, usize, usize) {
        self.pixels.dim()
    }

    /// Number of block rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of block columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Edge length of each block in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// View of the block at `(row, col)`
    pub fn tile(&self, row: usize, col: usize) -> Option<ArrayView3<'_, u8>> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let (top, left) = (row * self.tile_size, col * self.tile_size);
        Some(self.pixels.slice(s![
            top..top + self.tile_size,
            left..left + self.tile_size,
            ..
        ]))
    }

    /// Provenance of the block at `(row, col)`, if it has been placed
    pub fn origin(&self, row: usize, col: usize) -> Option<TileOrigin> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.origins.get(row * self.cols + col).copied().flatten()
    }

    /// Provenance of every placed block in row-major order
    pub fn origins(&self) -> impl Iterator<Item = TileOrigin> + '_ {
        self.origins.iter().filter_map(|origin| *origin)
    }

    /// Number of blocks filled with a placeholder
    pub fn placeholder_count(&self) -> usize {
        self.origins().filter(|origin| origin.is_placeholder()).count()
    }

    /// Number of blocks with the given provenance
    pub fn count(&self, origin: TileOrigin) -> usize {
        self.origins().filter(|o| *o == origin).count()
    }

    /// Convert into an 8-bit RGB image for export
    ///
    /// # Errors
    ///
    /// Returns an error if a canvas side does not fit in a `u32`
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let (height, width, _) = self.pixels.dim();
        let width_px = u32::try_from(width)
            .map_err(|e| invalid_parameter("width", &width, &e))?;
        let height_px = u32::try_from(height)
            .map_err(|e| invalid_parameter("height", &height, &e))?;

        // Logical iteration order is row-major regardless of memory layout
        let raw: Vec<u8> = self.pixels.iter().copied().collect();
        RgbImage::from_raw(width_px, height_px, raw).ok_or_else(|| {
            invalid_parameter(
                "pixels",
                &format!("{width}x{height}"),
                &"pixel buffer does not match canvas size",
            )
        })
    }
}
