//! Tile decoding, size coercion and placeholders

use crate::io::configuration::{CHANNELS, PLACEHOLDER_VALUE};
use crate::io::error::{Result, ViewerError, invalid_parameter};
use image::RgbImage;
use image::imageops::FilterType;
use ndarray::Array3;

/// Solid white tile used wherever no real image is available
pub fn placeholder_tile(tile_size: usize) -> Array3<u8> {
    Array3::from_elem((tile_size, tile_size, CHANNELS), PLACEHOLDER_VALUE)
}

/// Decode encoded image bytes into a `(tile_size, tile_size, 3)` tile
///
/// The format is sniffed from the content. Any color type is converted to
/// 8-bit RGB, and square images of another size are resampled to `tile_size`.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a decodable image ([`ViewerError::DecodeFailure`])
/// - The decoded image is not square ([`ViewerError::TileShape`])
pub fn decode_tile(bytes: &[u8], tile_size: usize, key: &str) -> Result<Array3<u8>> {
    let decoded =
        image::load_from_memory(bytes).map_err(|source| ViewerError::DecodeFailure {
            key: key.to_owned(),
            source,
        })?;

    let (width, height) = (decoded.width(), decoded.height());
    if width != height {
        return Err(ViewerError::TileShape {
            key: key.to_owned(),
            width,
            height,
        });
    }

    let target =
        u32::try_from(tile_size).map_err(|e| invalid_parameter("tile_size", &tile_size, &e))?;
    let rgb = decoded.into_rgb8();
    let rgb = if width == target {
        rgb
    } else {
        image::imageops::resize(&rgb, target, target, FilterType::Triangle)
    };

    image_to_array(rgb)
}

/// Reinterpret an RGB image as a `(height, width, 3)` array
///
/// # Errors
///
/// Returns an error if the pixel buffer length disagrees with the dimensions
pub fn image_to_array(image: RgbImage) -> Result<Array3<u8>> {
    let (width, height) = image.dimensions();
    Array3::from_shape_vec((height as usize, width as usize, CHANNELS), image.into_raw())
        .map_err(|e| invalid_parameter("image", &format!("{width}x{height}"), &e))
}
