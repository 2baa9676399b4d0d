//! Error types for archive access, tile decoding and canvas export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all rendering operations
///
/// Seeds outside the configured range and seeds missing from the archive are
/// not errors: they become placeholder tiles. Everything here aborts the
/// current render.
#[derive(Debug)]
pub enum ViewerError {
    /// The archive file could not be opened or its headers could not be walked
    ArchiveUnavailable {
        /// Path to the archive file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An indexed archive entry could not be read back
    EntryRead {
        /// Entry key inside the archive
        key: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Entry bytes are not a decodable image
    DecodeFailure {
        /// Entry key inside the archive
        key: String,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Decoded image cannot be coerced into a square tile
    TileShape {
        /// Entry key inside the archive
        key: String,
        /// Decoded width in pixels
        width: u32,
        /// Decoded height in pixels
        height: u32,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a composed canvas to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArchiveUnavailable { path, source } => {
                write!(f, "Archive '{}' is unavailable: {source}", path.display())
            }
            Self::EntryRead { key, source } => {
                write!(f, "Failed to read archive entry '{key}': {source}")
            }
            Self::DecodeFailure { key, source } => {
                write!(f, "Failed to decode archive entry '{key}': {source}")
            }
            Self::TileShape { key, width, height } => {
                write!(
                    f,
                    "Archive entry '{key}' is {width}x{height}, expected a square image"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ArchiveUnavailable { source, .. }
            | Self::EntryRead { source, .. }
            | Self::FileSystem { source, .. } => Some(source),
            Self::DecodeFailure { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::TileShape { .. } | Self::InvalidParameter { .. } => None,
        }
    }
}

impl ViewerError {
    /// Whether the error stems from corrupt archive content rather than setup
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::EntryRead { .. } | Self::DecodeFailure { .. } | Self::TileShape { .. }
        )
    }
}

/// Convenience type alias for rendering results
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ViewerError {
    ViewerError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
