//! Archive-backed grid rendering with injected dataset configuration

use crate::archive::{TarArchive, TileSource};
use crate::compose::compositor::Compositor;
use crate::io::configuration::{ARCHIVE_DIRNAME, TILE_SIZE};
use crate::io::error::Result;
use crate::spatial::{Canvas, GridSpec, SeedRange, TileOrigin, plan};
use std::path::Path;

/// Dataset layout a renderer is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Edge length of each block in pixels
    pub tile_size: usize,
    /// Seeds present in the dataset
    pub seed_range: SeedRange,
    /// Directory prefix of entries inside the archive
    pub dirname: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE as usize,
            seed_range: SeedRange::default(),
            dirname: ARCHIVE_DIRNAME.to_owned(),
        }
    }
}

/// Renders seed grids from an archive
#[derive(Debug, Clone)]
pub struct GridRenderer {
    config: RenderConfig,
    compositor: Compositor,
}

impl GridRenderer {
    /// Create a renderer for the given dataset layout
    ///
    /// # Errors
    ///
    /// Returns an error if the configured tile size is zero
    pub fn new(config: RenderConfig) -> Result<Self> {
        let compositor = Compositor::new(config.tile_size)?;
        Ok(Self { config, compositor })
    }

    /// Dataset layout this renderer was built with
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Open and index the archive at `path` using the configured prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or indexed
    pub fn open_archive<P: AsRef<Path>>(&self, path: P) -> Result<TarArchive> {
        TarArchive::open(path, &self.config.dirname)
    }

    /// Render one grid, holding the archive open only for this call
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is unavailable or an entry is corrupt
    pub fn render<P: AsRef<Path>>(&self, archive_path: P, grid: &GridSpec) -> Result<Canvas> {
        let mut archive = self.open_archive(archive_path)?;
        self.render_from(&mut archive, grid)
    }

    /// Render `pages` consecutive grids from a single archive open
    ///
    /// Page `p` starts at `first.start_seed() + p * rows * cols`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is unavailable, an entry is corrupt,
    /// or a page start seed overflows
    pub fn render_pages<P: AsRef<Path>>(
        &self,
        archive_path: P,
        first: &GridSpec,
        pages: usize,
    ) -> Result<Vec<Canvas>> {
        let mut archive = self.open_archive(archive_path)?;
        first
            .pages(pages)
            .map(|grid| self.render_from(&mut archive, &grid?))
            .collect()
    }

    /// Render one grid from an already opened tile source
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be read or decoded
    pub fn render_from<S>(&self, source: &mut S, grid: &GridSpec) -> Result<Canvas>
    where
        S: TileSource + ?Sized,
    {
        self.render_observed(source, grid, |_, _| {})
    }

    /// Render like [`Self::render_from`], reporting each placed block
    ///
    /// # Errors
    ///
    /// Same as [`Self::render_from`]
    pub fn render_observed<S, F>(
        &self,
        source: &mut S,
        grid: &GridSpec,
        observe: F,
    ) -> Result<Canvas>
    where
        S: TileSource + ?Sized,
        F: FnMut(usize, TileOrigin),
    {
        let planned = plan(grid, &self.config.seed_range);
        self.compositor
            .compose_observed(&planned, grid, source, observe)
    }
}
