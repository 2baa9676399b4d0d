//! Random access to the packed image archive
//!
//! Entries are addressed by seed through a fixed key layout. The compositor
//! only sees the [`TileSource`] trait, so tests and alternative containers
//! can stand in for the tar reader.

/// Entry key layout
pub mod key;
/// Indexed tar archive reader
pub mod reader;

pub use key::entry_key;
pub use reader::TarArchive;

use crate::io::error::Result;

/// Source of raw encoded tile bytes addressed by seed
pub trait TileSource {
    /// Fetch the encoded bytes stored for `seed`
    ///
    /// `Ok(None)` means the source has no entry for the seed, which the
    /// caller recovers from with a placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing entry cannot be read
    fn fetch(&mut self, seed: i64) -> Result<Option<Vec<u8>>>;

    /// Human-readable name of the entry for `seed`, used in diagnostics
    fn describe(&self, seed: i64) -> String {
        seed.to_string()
    }
}
