//! Image format detection by content sniffing.
//!
//! The importer never trusts filename extensions: the source bytes are
//! sniffed with the `image` crate and the detected format drives both
//! validation and target filename derivation.

use std::path::Path;

use image::ImageFormat;
use tracing::debug;

use crate::error::{Error, Result};

/// Image format identified from a source file's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedImage {
    format: ImageFormat,
}

impl DetectedImage {
    /// The detected format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Full MIME type, e.g. `image/jpeg`.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Subtype half of the MIME type, e.g. `jpeg` for `image/jpeg`.
    pub fn subtype(&self) -> &'static str {
        self.mime_type().split('/').nth(1).unwrap_or_default()
    }

    /// Whether `ext` is a known filename extension for this format.
    ///
    /// Case-insensitive; `jpg` and `jpeg` both match `image/jpeg`.
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.format.extensions_str().contains(&ext.as_str())
    }
}

/// Sniff the bytes at `path` and identify the image format.
///
/// Returns [`Error::UnrecognizedImage`] when the file cannot be read or its
/// bytes are not recognizable image data.
pub fn detect_image(path: &Path) -> Result<DetectedImage> {
    let bytes = std::fs::read(path).map_err(|error| {
        debug!(path = %path.display(), %error, "Failed to read import source");
        Error::unrecognized_image(path)
    })?;

    let format =
        image::guess_format(&bytes).map_err(|_| Error::unrecognized_image(path))?;

    Ok(DetectedImage { format })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;

    use super::*;

    fn encode_sample(format: ImageFormat) -> Vec<u8> {
        let mut img = image::RgbImage::new(2, 2);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([0, 128, 255]);
        }
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, format)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_detect_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample");
        std::fs::write(&path, encode_sample(ImageFormat::Jpeg)).unwrap();

        let detected = detect_image(&path).unwrap();
        assert_eq!(detected.format(), ImageFormat::Jpeg);
        assert_eq!(detected.mime_type(), "image/jpeg");
        assert_eq!(detected.subtype(), "jpeg");
    }

    #[test]
    fn test_detect_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.bin");
        std::fs::write(&path, encode_sample(ImageFormat::Png)).unwrap();

        let detected = detect_image(&path).unwrap();
        assert_eq!(detected.subtype(), "png");
    }

    #[test]
    fn test_jpg_and_jpeg_both_match_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo");
        std::fs::write(&path, encode_sample(ImageFormat::Jpeg)).unwrap();

        let detected = detect_image(&path).unwrap();
        assert!(detected.matches_extension("jpg"));
        assert!(detected.matches_extension("JPEG"));
        assert!(!detected.matches_extension("png"));
    }

    #[test]
    fn test_non_image_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"plain text, not pixels").unwrap();

        let err = detect_image(&path).unwrap_err();
        assert_matches!(err, Error::UnrecognizedImage { .. });
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let err = detect_image(Path::new("/definitely/not/here.jpg")).unwrap_err();
        assert_matches!(err, Error::UnrecognizedImage { .. });
    }
}
