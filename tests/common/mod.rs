//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which bundles an in-memory host, an importer
//! wired against it, and a temp directory for writing image fixtures.

use std::path::PathBuf;
use std::sync::Arc;

use image::ImageFormat;
use sideloader::host::memory::MemoryHost;
use sideloader::{ImporterConfig, MediaImporter};

/// Test harness wrapping a [`MediaImporter`] backed by an in-memory host.
pub struct TestHarness {
    pub host: Arc<MemoryHost>,
    pub importer: MediaImporter,
    dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration and no host editors.
    pub fn new() -> Self {
        Self::build(MemoryHost::new(), ImporterConfig::default())
    }

    /// Create a new harness whose host reports the given image editors.
    pub fn with_editors(editors: &[&str]) -> Self {
        Self::build(
            MemoryHost::with_editors(editors.iter().copied()),
            ImporterConfig::default(),
        )
    }

    fn build(host: MemoryHost, config: ImporterConfig) -> Self {
        let host = Arc::new(host);
        let importer = MediaImporter::new(host.clone(), host.clone(), config);
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        Self {
            host,
            importer,
            dir,
        }
    }

    /// Write a small JPEG into the harness temp dir and return its path.
    pub fn write_jpeg(&self, name: &str) -> PathBuf {
        self.write_image(name, ImageFormat::Jpeg)
    }

    /// Write a small PNG into the harness temp dir and return its path.
    pub fn write_png(&self, name: &str) -> PathBuf {
        self.write_image(name, ImageFormat::Png)
    }

    fn write_image(&self, name: &str, format: ImageFormat) -> PathBuf {
        let mut img = image::RgbImage::new(2, 2);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([255, 0, 0]);
        }
        let path = self.dir.path().join(name);
        image::DynamicImage::ImageRgb8(img)
            .save_with_format(&path, format)
            .expect("failed to write image fixture");
        path
    }

    /// Write a file whose bytes are not recognizable image data.
    pub fn write_garbage(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, b"definitely not an image").expect("failed to write fixture");
        path
    }
}
