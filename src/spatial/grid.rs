//! Seed grid planning
//!
//! A grid shows `rows * cols` consecutive seeds starting at `start_seed`,
//! consumed row-major: seed `start_seed + k` lands at block `(k / cols, k % cols)`.
//! Planning marks each seed as inside or outside the dataset's seed range so
//! the compositor never asks the archive for seeds that cannot exist.

use crate::io::configuration::{MAX_SEED, MIN_SEED};
use crate::io::error::{Result, invalid_parameter};

/// Inclusive interval of seeds present in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRange {
    min: i64,
    max: i64,
}

impl SeedRange {
    /// Create a range covering `min..=max`
    ///
    /// # Errors
    ///
    /// Returns an error if `min` is greater than `max`
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(invalid_parameter(
                "seed_range",
                &format!("{min}..={max}"),
                &"minimum seed must not exceed maximum seed",
            ));
        }
        Ok(Self { min, max })
    }

    /// Smallest seed in the range
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Largest seed in the range
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Check if a seed lies within the range (bounds included)
    pub const fn contains(&self, seed: i64) -> bool {
        seed >= self.min && seed <= self.max
    }
}

impl Default for SeedRange {
    fn default() -> Self {
        Self {
            min: MIN_SEED,
            max: MAX_SEED,
        }
    }
}

/// Shape and starting seed of one grid render
///
/// Only constructible through [`GridSpec::new`], so every grid has at least
/// one row and one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    start_seed: i64,
    rows: usize,
    cols: usize,
}

impl GridSpec {
    /// Create a grid spec with at least one row and one column
    ///
    /// # Errors
    ///
    /// Returns an error if `rows` or `cols` is zero, or their product overflows
    pub fn new(start_seed: i64, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"must be at least 1"));
        }
        if cols == 0 {
            return Err(invalid_parameter("cols", &cols, &"must be at least 1"));
        }
        if rows.checked_mul(cols).is_none() {
            return Err(invalid_parameter(
                "cols",
                &cols,
                &format!("{rows} rows of {cols} columns overflow the tile count"),
            ));
        }
        Ok(Self {
            start_seed,
            rows,
            cols,
        })
    }

    /// Seed shown in the top-left block
    pub const fn start_seed(&self) -> i64 {
        self.start_seed
    }

    /// Number of block rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of block columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of blocks in the grid
    pub const fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Grid of the same shape starting right after this one ends
    ///
    /// # Errors
    ///
    /// Returns an error if the next start seed does not fit in an `i64`
    pub fn next_page(&self) -> Result<Self> {
        let start_seed = seed_at(self.start_seed, self.tile_count()).ok_or_else(|| {
            invalid_parameter(
                "start_seed",
                &self.start_seed,
                &format!(
                    "page after {} tiles overflows the seed type",
                    self.tile_count()
                ),
            )
        })?;
        Ok(Self { start_seed, ..*self })
    }

    /// Iterate over `count` consecutive pages, starting with this grid
    ///
    /// Yields an error and stops if a page start seed overflows.
    pub const fn pages(self, count: usize) -> Pages {
        Pages {
            next: Some(Ok(self)),
            remaining: count,
        }
    }
}

/// Consecutive same-shape grids, see [`GridSpec::pages`]
#[derive(Debug)]
pub struct Pages {
    next: Option<Result<GridSpec>>,
    remaining: usize,
}

impl Iterator for Pages {
    type Item = Result<GridSpec>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        match self.next.take()? {
            Ok(grid) => {
                if self.remaining > 0 {
                    self.next = Some(grid.next_page());
                }
                Some(Ok(grid))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }
}

/// One block of a planned grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedTile {
    /// Seed shown in this block
    pub seed: i64,
    /// Whether the seed lies within the dataset's seed range
    pub in_range: bool,
}

/// Block coordinates `(row, col)` of the `index`-th tile in row-major order
pub const fn block_position(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

fn seed_at(start_seed: i64, offset: usize) -> Option<i64> {
    i64::try_from(offset)
        .ok()
        .and_then(|offset| start_seed.checked_add(offset))
}

/// Plan the ordered seeds needed to fill `grid`
///
/// Produces exactly `grid.tile_count()` entries with seeds increasing by one,
/// in the order blocks are laid out on the canvas. Seeds past `i64::MAX`
/// saturate and are always out of range.
pub fn plan(grid: &GridSpec, range: &SeedRange) -> Vec<PlannedTile> {
    (0..grid.tile_count())
        .map(|offset| match seed_at(grid.start_seed, offset) {
            Some(seed) => PlannedTile {
                seed,
                in_range: range.contains(seed),
            },
            None => PlannedTile {
                seed: i64::MAX,
                in_range: false,
            },
        })
        .collect()
}
