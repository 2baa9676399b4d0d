//! Dataset constants and runtime configuration defaults

// Dataset layout
/// Edge length of each tile in the composed canvas
pub const TILE_SIZE: u32 = 128;
/// Largest accepted tile edge length
pub const MAX_TILE_SIZE: usize = 1024;
/// Smallest seed present in the dataset
pub const MIN_SEED: i64 = 0;
/// Largest seed present in the dataset
pub const MAX_SEED: i64 = 99_999;
/// Directory prefix of every entry inside the archive
pub const ARCHIVE_DIRNAME: &str = "0-99999";
/// Zero padding applied to seeds in entry names
pub const SEED_DIGITS: usize = 7;
/// Extension of every image entry inside the archive
pub const ENTRY_EXTENSION: &str = "jpg";

/// Channel value of the solid white placeholder tile
pub const PLACEHOLDER_VALUE: u8 = 255;
/// Channels per pixel (8-bit RGB)
pub const CHANNELS: usize = 3;

// Grid shape bounds, enforced at the command line
/// Smallest number of rows or columns
pub const MIN_GRID_DIMENSION: usize = 1;
/// Largest number of rows or columns
pub const MAX_GRID_DIMENSION: usize = 10;

// Default values for configurable parameters
/// First seed shown when none is given
pub const DEFAULT_START_SEED: i64 = 0;
/// Default number of grid rows
pub const DEFAULT_ROWS: usize = 2;
/// Default number of grid columns
pub const DEFAULT_COLS: usize = 5;
/// Default number of consecutive pages to render
pub const DEFAULT_PAGES: usize = 1;

// Output settings
/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "grid.png";
/// Environment variable consulted for the archive path
pub const ARCHIVE_ENV_VAR: &str = "SEEDGRID_ARCHIVE";
/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
