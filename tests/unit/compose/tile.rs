//! Tests for tile decoding, size coercion and placeholders

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
    use seedgrid::ViewerError;
    use seedgrid::compose::tile::{decode_tile, image_to_array, placeholder_tile};
    use std::io::Cursor;

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb(rgb));
        encode(&DynamicImage::ImageRgb8(image), ImageFormat::Png)
    }

    // Tests placeholder is solid white with three channels
    // Verified by filling with zero
    #[test]
    fn test_placeholder_tile() {
        let tile = placeholder_tile(128);
        assert_eq!(tile.dim(), (128, 128, 3));
        assert!(tile.iter().all(|&v| v == 255));
    }

    // Tests a correctly sized image decodes losslessly
    // Verified by swapping channel order
    #[test]
    fn test_decode_exact_size() {
        let tile = decode_tile(&solid_png(8, 8, [1, 2, 3]), 8, "k").unwrap();
        assert_eq!(tile.dim(), (8, 8, 3));
        assert_eq!(tile[[7, 7, 0]], 1);
        assert_eq!(tile[[7, 7, 1]], 2);
        assert_eq!(tile[[7, 7, 2]], 3);
    }

    // Tests larger square images are downsampled to the tile size
    // Verified by cropping instead of resizing
    #[test]
    fn test_decode_downsamples() {
        let tile = decode_tile(&solid_png(512, 512, [40, 80, 120]), 128, "k").unwrap();
        assert_eq!(tile.dim(), (128, 128, 3));
        for (channel, expected) in [40i16, 80, 120].into_iter().enumerate() {
            let value = i16::from(tile[[64, 64, channel]]);
            assert!((value - expected).abs() <= 1);
        }
    }

    // Tests JPEG entries decode to the tile size
    // Verified by requiring PNG input
    #[test]
    fn test_decode_jpeg() {
        let image = RgbImage::from_pixel(16, 16, Rgb([100, 150, 200]));
        let bytes = encode(&DynamicImage::ImageRgb8(image), ImageFormat::Jpeg);

        let tile = decode_tile(&bytes, 16, "k").unwrap();
        assert_eq!(tile.dim(), (16, 16, 3));
        let value = i16::from(tile[[8, 8, 1]]);
        assert!((value - 150).abs() <= 8);
    }

    // Tests grayscale images are expanded to three channels
    // Verified by keeping a single channel
    #[test]
    fn test_decode_grayscale() {
        let gray = GrayImage::from_pixel(4, 4, Luma([77]));
        let bytes = encode(&DynamicImage::ImageLuma8(gray), ImageFormat::Png);

        let tile = decode_tile(&bytes, 4, "k").unwrap();
        assert_eq!(tile.dim(), (4, 4, 3));
        assert!(tile.iter().all(|&v| v == 77));
    }

    // Tests non-square images are rejected with their size
    // Verified by stretching to square
    #[test]
    fn test_decode_rejects_non_square() {
        let err = decode_tile(&solid_png(8, 4, [0, 0, 0]), 8, "d/0000001.jpg").unwrap_err();
        match err {
            ViewerError::TileShape { key, width, height } => {
                assert_eq!(key, "d/0000001.jpg");
                assert_eq!((width, height), (8, 4));
            }
            other => unreachable!("Expected TileShape, got {other}"),
        }
    }

    // Tests corrupt bytes surface as a decode failure
    // Verified by substituting a placeholder
    #[test]
    fn test_decode_corrupt_bytes() {
        let err = decode_tile(b"definitely not an image", 8, "d/0000002.jpg").unwrap_err();
        assert!(matches!(err, ViewerError::DecodeFailure { .. }));
        assert!(err.is_corruption());
        assert!(err.to_string().contains("d/0000002.jpg"));
    }

    // Tests image conversion keeps row-major pixel order
    // Verified by transposing axes
    #[test]
    fn test_image_to_array() {
        let mut image = RgbImage::new(3, 2);
        image.put_pixel(2, 1, Rgb([9, 8, 7]));

        let array = image_to_array(image).unwrap();
        assert_eq!(array.dim(), (2, 3, 3));
        assert_eq!(array[[1, 2, 0]], 9);
        assert_eq!(array[[1, 2, 2]], 7);
    }
}
