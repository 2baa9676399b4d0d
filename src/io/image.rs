//! Canvas export to image files

use crate::io::error::{Result, ViewerError};
use crate::spatial::Canvas;
use std::path::Path;

/// Write a composed canvas to `output_path`
///
/// The encoding follows the file extension (`.png`, `.jpg`, ...).
///
/// # Errors
///
/// Returns an error if:
/// - The canvas is too large to convert into an image
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn export_canvas<P: AsRef<Path>>(canvas: &Canvas, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    let image = canvas.to_rgb_image()?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ViewerError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| ViewerError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(path = %output_path.display(), "exported canvas");
    Ok(())
}
