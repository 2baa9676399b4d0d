//! Command-line interface for rendering seed grids to image files

use crate::archive::TarArchive;
use crate::compose::{GridRenderer, RenderConfig};
use crate::io::configuration::{
    ARCHIVE_DIRNAME, ARCHIVE_ENV_VAR, DEFAULT_COLS, DEFAULT_OUTPUT, DEFAULT_PAGES, DEFAULT_ROWS,
    DEFAULT_START_SEED, MAX_GRID_DIMENSION, MAX_SEED, MAX_TILE_SIZE, MIN_GRID_DIMENSION, MIN_SEED,
    TILE_SIZE,
};
use crate::io::error::Result;
use crate::io::image::export_canvas;
use crate::io::progress::ProgressManager;
use crate::spatial::{GridSpec, SeedRange, TileOrigin};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "seedgrid")]
#[command(
    author,
    version,
    about = "Render consecutive seeds from an image archive into one tiled preview"
)]
/// Command-line arguments for the grid renderer
pub struct Cli {
    /// Tar archive holding the seed images
    #[arg(short, long, env = ARCHIVE_ENV_VAR, value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Seed shown in the top-left block
    #[arg(short, long, default_value_t = DEFAULT_START_SEED, allow_negative_numbers = true)]
    pub start_seed: i64,

    /// Number of rows in the grid
    #[arg(short, long, default_value_t = DEFAULT_ROWS, value_parser = parse_grid_dimension)]
    pub rows: usize,

    /// Number of columns in the grid
    #[arg(short, long, default_value_t = DEFAULT_COLS, value_parser = parse_grid_dimension)]
    pub cols: usize,

    /// Number of consecutive grids to render
    #[arg(short, long, default_value_t = DEFAULT_PAGES, value_parser = parse_page_count)]
    pub pages: usize,

    /// Output image path; pages after the first get a numbered suffix
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Edge length of each tile in pixels
    #[arg(long, default_value_t = TILE_SIZE, value_parser = parse_tile_size)]
    pub tile_size: u32,

    /// Smallest seed present in the archive
    #[arg(long, default_value_t = MIN_SEED, allow_negative_numbers = true)]
    pub min_seed: i64,

    /// Largest seed present in the archive
    #[arg(long, default_value_t = MAX_SEED, allow_negative_numbers = true)]
    pub max_seed: i64,

    /// Directory prefix of entries inside the archive
    #[arg(long, default_value = ARCHIVE_DIRNAME)]
    pub dirname: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Render pages even if their output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

fn parse_grid_dimension(value: &str) -> std::result::Result<usize, String> {
    let parsed: usize = value.parse().map_err(|e| format!("{e}"))?;
    if (MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!(
            "must be between {MIN_GRID_DIMENSION} and {MAX_GRID_DIMENSION}"
        ))
    }
}

fn parse_tile_size(value: &str) -> std::result::Result<u32, String> {
    let parsed: usize = value.parse().map_err(|e| format!("{e}"))?;
    if (1..=MAX_TILE_SIZE).contains(&parsed) {
        u32::try_from(parsed).map_err(|e| format!("{e}"))
    } else {
        Err(format!("must be between 1 and {MAX_TILE_SIZE}"))
    }
}

fn parse_page_count(value: &str) -> std::result::Result<usize, String> {
    let parsed: usize = value.parse().map_err(|e| format!("{e}"))?;
    if parsed == 0 {
        Err("must be at least 1".to_string())
    } else {
        Ok(parsed)
    }
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Dataset layout described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the seed bounds are inverted
    pub fn render_config(&self) -> Result<RenderConfig> {
        Ok(RenderConfig {
            tile_size: self.tile_size as usize,
            seed_range: SeedRange::new(self.min_seed, self.max_seed)?,
            dirname: self.dirname.clone(),
        })
    }

    /// Shape and start seed of the first page
    ///
    /// # Errors
    ///
    /// Returns an error if the grid shape is invalid
    pub fn first_grid(&self) -> Result<GridSpec> {
        GridSpec::new(self.start_seed, self.rows, self.cols)
    }
}

/// Output path for the `page`-th grid of a run
///
/// A single-page run writes to `output` unchanged. Multi-page runs insert the
/// zero-padded page number before the extension.
pub fn page_output_path(output: &Path, page: usize, pages: usize) -> PathBuf {
    if pages <= 1 {
        return output.to_path_buf();
    }

    let stem = output.file_stem().unwrap_or_default().to_string_lossy();
    let width = (pages - 1).to_string().len();
    let name = match output.extension() {
        Some(extension) => format!("{stem}_{page:0width$}.{}", extension.to_string_lossy()),
        None => format!("{stem}_{page:0width$}"),
    };

    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}

/// Orchestrates rendering of one or more pages with progress tracking
pub struct PageProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl PageProcessor {
    /// Create a new page processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Render every requested page and write it to disk
    ///
    /// The archive is opened once for the whole run and released on return.
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, archive access, composition
    /// or export fails
    pub fn process(&mut self) -> Result<()> {
        let renderer = GridRenderer::new(self.cli.render_config()?)?;
        let pages = self.collect_pages()?;

        if pages.is_empty() {
            return Ok(());
        }

        let mut archive = renderer.open_archive(&self.cli.archive)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(pages.len());
        }

        for (slot, (grid, output)) in pages.iter().enumerate() {
            self.process_page(&renderer, &mut archive, slot, grid, output)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_pages(&self) -> Result<Vec<(GridSpec, PathBuf)>> {
        let mut pages = Vec::with_capacity(self.cli.pages);

        for (page, grid) in self.cli.first_grid()?.pages(self.cli.pages).enumerate() {
            let grid = grid?;
            let output = page_output_path(&self.cli.output, page, self.cli.pages);
            if self.should_render(&output) {
                pages.push((grid, output));
            }
        }

        Ok(pages)
    }

    fn should_render(&self, output_path: &Path) -> bool {
        if !self.cli.skip_existing() || !output_path.exists() {
            return true;
        }

        // Allow print for user feedback for progress messages
        #[allow(clippy::print_stderr)]
        if !self.cli.quiet {
            eprintln!("Skipping: {} (output exists)", output_path.display());
        }
        false
    }

    fn process_page(
        &mut self,
        renderer: &GridRenderer,
        archive: &mut TarArchive,
        slot: usize,
        grid: &GridSpec,
        output_path: &Path,
    ) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            let label = output_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy();
            pm.start_page(slot, &label, grid.tile_count());
        }

        let progress = &mut self.progress_manager;
        let canvas = renderer.render_observed(archive, grid, |index, _| {
            if let Some(pm) = progress.as_mut() {
                pm.update_tiles(slot, index + 1);
            }
        })?;

        export_canvas(&canvas, output_path)?;

        tracing::info!(
            start_seed = grid.start_seed(),
            output = %output_path.display(),
            missing = canvas.count(TileOrigin::MissingEntry),
            out_of_range = canvas.count(TileOrigin::OutOfRange),
            "rendered page"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_page(slot, start_time.elapsed());
        }

        Ok(())
    }
}
