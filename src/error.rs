//! Error types used throughout sideloader.
//!
//! Both failure modes are returned as values, never panicked: an import
//! source that cannot be identified as an image, and a host platform call
//! that failed. Host errors pass through unchanged so no detail is lost at
//! the boundary.

use std::path::PathBuf;

use crate::host::HostError;

/// Error type for importer operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source bytes could not be identified as an image.
    #[error("Could not identify MIME type of source image {}. Is this an image?", path.display())]
    UnrecognizedImage {
        /// Path of the offending source file.
        path: PathBuf,
    },

    /// A host platform operation failed; carries the host's error unchanged.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl Error {
    /// Create a new UnrecognizedImage error for the given source path.
    pub fn unrecognized_image<P: Into<PathBuf>>(path: P) -> Self {
        Self::UnrecognizedImage { path: path.into() }
    }
}

/// Result type alias using the importer Error type.
pub type Result<T> = std::result::Result<T, Error>;
