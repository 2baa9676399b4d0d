//! Seed to entry-name mapping

use crate::io::configuration::{ENTRY_EXTENSION, SEED_DIGITS};

/// Build the archive entry name for `seed` below `dirname`
///
/// Seeds are zero padded to [`SEED_DIGITS`]; a negative seed keeps its sign
/// ahead of the padding (`-000003`).
pub fn entry_key(dirname: &str, seed: i64) -> String {
    format!(
        "{dirname}/{seed:0width$}.{ENTRY_EXTENSION}",
        width = SEED_DIGITS
    )
}

/// Normalize an entry path read from an archive header
pub(crate) fn normalize_entry_path(path: &str) -> &str {
    let mut trimmed = path;
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed
}
