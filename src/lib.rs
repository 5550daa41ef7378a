//! Sideloader - image import into a host platform's asset library.
//!
//! This crate is a thin client of an abstract content-management host: it
//! sniffs a local image file, delegates ingestion to the host's sideload
//! mechanism, tags the created asset with an ownership marker, applies
//! optional text metadata, and can later find and delete every asset it
//! created. All host interaction goes through the [`host::HostPlatform`]
//! and [`host::EditorRegistry`] traits, so the importer runs unchanged
//! against [`host::memory::MemoryHost`] in tests.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use sideloader::host::memory::MemoryHost;
//! use sideloader::{ImporterConfig, MediaImporter};
//!
//! let host = Arc::new(MemoryHost::new());
//! let importer = MediaImporter::new(host.clone(), host, ImporterConfig::default());
//!
//! // Nothing imported yet, so there is nothing to clean up.
//! assert!(!importer.cleanup().unwrap());
//! ```

pub mod detect;
pub mod editors;
pub mod error;
pub mod host;
pub mod ids;
pub mod importer;
pub mod sanitize;

pub use error::{Error, Result};
pub use ids::{AssetId, OwnerId};
pub use importer::{ImportRequest, ImporterConfig, MediaImporter};
