//! Decoding source images into luminance fields.

use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};

use crate::ascii::{ArtError, LuminanceField};

/// Errors that can occur while loading a source image.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to decode image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Art(#[from] ArtError),
}

/// Decode the image at `path` (any format the `image` crate supports) and
/// convert it to a luminance field.
pub fn load_field(path: &Path) -> Result<LuminanceField, SourceError> {
    let img = image::open(path).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(field_from_image(&img)?)
}

/// Convert a decoded image to a luminance field.
pub fn field_from_image(img: &DynamicImage) -> Result<LuminanceField, ArtError> {
    field_from_rgba(&img.to_rgba8())
}

/// Convert an RGBA8 image buffer to a luminance field.
pub fn field_from_rgba(img: &RgbaImage) -> Result<LuminanceField, ArtError> {
    LuminanceField::from_rgba(img.as_raw(), img.width(), img.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba};

    #[test]
    fn test_gray_image_converts() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([51])));
        let field = field_from_image(&img).unwrap();
        assert_eq!((field.width(), field.height()), (3, 2));
        assert!((field.mean() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_transparent_rgba_reads_white() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]));
        let field = field_from_rgba(&img).unwrap();
        assert_eq!(field.mean(), 1.0);
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = RgbaImage::new(0, 5);
        assert!(matches!(
            field_from_rgba(&img),
            Err(ArtError::InvalidImage { .. })
        ));
    }

    #[test]
    fn test_load_round_trip_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(4, 4, Luma([0])).save(&path).unwrap();

        let field = load_field(&path).unwrap();
        assert_eq!((field.width(), field.height()), (4, 4));
        assert_eq!(field.mean(), 0.0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_field(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(SourceError::Decode { .. })));
    }
}
