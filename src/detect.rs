//! Image format detection for referenced picture files.

use crate::error::{Error, Result};
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// Raster formats the PDF emitter can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
    /// Graphics Interchange Format
    Gif,
}

impl ImageKind {
    /// Map a format guessed by the `image` crate; `None` for formats we do not embed.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(ImageKind::Png),
            ImageFormat::Jpeg => Some(ImageKind::Jpeg),
            ImageFormat::Gif => Some(ImageKind::Gif),
            _ => None,
        }
    }

    /// MIME type for the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
        }
    }

    /// Matching decoder format in the `image` crate.
    pub fn to_image_format(self) -> ImageFormat {
        match self {
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Gif => ImageFormat::Gif,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Detect a supported image format from file contents.
pub fn detect_image(data: &[u8]) -> Option<ImageKind> {
    image::guess_format(data)
        .ok()
        .and_then(ImageKind::from_image_format)
}

/// Read and decode a PNG, JPEG or GIF file.
///
/// # Returns
/// * `Ok((ImageKind, DynamicImage))` for a supported, decodable file
/// * `Err(Error::UnsupportedImageFormat)` when the contents are another format
/// * `Err(Error::Image)` or `Err(Error::Io)` when reading or decoding fails
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<(ImageKind, DynamicImage)> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let kind =
        detect_image(&bytes).ok_or_else(|| Error::UnsupportedImageFormat(path.to_path_buf()))?;
    let decoded = image::load_from_memory_with_format(&bytes, kind.to_image_format())?;
    Ok((kind, decoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_supported() {
        assert_eq!(
            detect_image(b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR"),
            Some(ImageKind::Png)
        );
        assert_eq!(detect_image(b"\xff\xd8\xff\xe0\x00\x10JFIF"), Some(ImageKind::Jpeg));
        assert_eq!(detect_image(b"GIF89a...."), Some(ImageKind::Gif));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_image(b"plain text"), None);
        assert_eq!(detect_image(b""), None);
        // Recognised by the image crate, but not embeddable.
        assert_eq!(detect_image(b"BM\x00\x00\x00\x00"), None);
    }

    #[test]
    fn test_load_image() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("chart.png");
        image::RgbImage::from_pixel(4, 3, image::Rgb([1, 2, 3]))
            .save(&png)
            .unwrap();
        let (kind, decoded) = load_image(&png).unwrap();
        assert_eq!(kind, ImageKind::Png);
        assert_eq!((decoded.width(), decoded.height()), (4, 3));

        let notes = dir.path().join("notes.png");
        std::fs::write(&notes, "plain text").unwrap();
        assert!(matches!(
            load_image(&notes),
            Err(Error::UnsupportedImageFormat(_))
        ));

        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"\x89PNG\r\n\x1a\nbroken").unwrap();
        let err = load_image(&broken).unwrap_err();
        assert!(!matches!(err, Error::UnsupportedImageFormat(_)));
    }
}
