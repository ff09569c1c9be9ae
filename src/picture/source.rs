/// Image loading and pixel sampling.

use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;

use crate::mix::PixelColor;

/// File extensions accepted for loading (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unsupported image format: {0} (expected jpg, jpeg or png)")]
    UnsupportedFormat(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image has no pixels")]
    EmptyImage,
}

/// A decoded image held as RGB8.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub pixels: RgbImage,
}

impl LoadedImage {
    /// Wrap an already decoded buffer.
    pub fn from_rgb(path: impl Into<PathBuf>, pixels: RgbImage) -> Result<Self, SourceError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(SourceError::EmptyImage);
        }
        Ok(Self {
            path: path.into(),
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Pixel at column `x`, row `y`, or `None` outside the image.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<PixelColor> {
        self.pixels.get_pixel_checked(x, y).map(|px| PixelColor::from(*px))
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}

/// True if the path carries one of the accepted extensions.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Load an image file and convert it to RGB8. Alpha is discarded.
pub fn load_image(path: &Path) -> Result<LoadedImage, SourceError> {
    if !is_supported(path) {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_else(|| "no extension".to_string());
        return Err(SourceError::UnsupportedFormat(ext));
    }

    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "decoded image"
    );

    LoadedImage::from_rgb(path, decoded.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> RgbImage {
        RgbImage::from_fn(4, 3, |x, y| image::Rgb([x as u8 * 10, y as u8 * 20, 7]))
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("a.png")));
        assert!(is_supported(Path::new("a.JPG")));
        assert!(is_supported(Path::new("dir/a.jpeg")));
        assert!(!is_supported(Path::new("a.gif")));
        assert!(!is_supported(Path::new("a.bmp")));
        assert!(!is_supported(Path::new("png")));
    }

    #[test]
    fn test_unsupported_does_not_touch_disk() {
        let err = load_image(Path::new("/definitely/missing/file.gif")).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat(ref e) if e == ".gif"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_image(Path::new("/definitely/missing/file.png")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_pixel_at_row_column_order() {
        let img = LoadedImage::from_rgb("mem.png", checker()).unwrap();
        assert_eq!(img.pixel_at(3, 2), Some(PixelColor::new(30, 40, 7)));
        assert_eq!(img.pixel_at(0, 1), Some(PixelColor::new(0, 20, 7)));
    }

    #[test]
    fn test_pixel_at_out_of_bounds() {
        let img = LoadedImage::from_rgb("mem.png", checker()).unwrap();
        assert_eq!(img.pixel_at(4, 0), None);
        assert_eq!(img.pixel_at(0, 3), None);
    }

    #[test]
    fn test_empty_image_rejected() {
        let err = LoadedImage::from_rgb("mem.png", RgbImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, SourceError::EmptyImage));
    }

    #[test]
    fn test_file_name() {
        let img = LoadedImage::from_rgb("some/dir/photo.png", checker()).unwrap();
        assert_eq!(img.file_name(), "photo.png");
    }
}
