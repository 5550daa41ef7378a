//! Host platform interface consumed by the importer.
//!
//! Sideloader is entirely a client of a surrounding content-management
//! host. This module defines the [`HostPlatform`] trait covering the host
//! operations the importer relies on (sideload, metadata, record update,
//! query, delete) plus the [`EditorRegistry`] capability used to register
//! an image-editor preference. Production embedders implement these against
//! the real host; [`memory::MemoryHost`] implements both in memory.

pub mod memory;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::editors::EditorFilter;
use crate::ids::{AssetId, OwnerId};

/// Loosely-typed metadata value stored against an asset.
pub type MetaValue = serde_json::Value;

/// Meta key under which the host stores an asset's alternative text.
pub const ALT_TEXT_META_KEY: &str = "_asset_image_alt";

/// Error reported by a host platform operation.
///
/// Opaque to the importer; the host's message is carried unchanged.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    /// The host's own description of the failure.
    pub message: String,
}

impl HostError {
    /// Create a new host error with the given message.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A local file handed to the host for sideloading.
#[derive(Debug, Clone)]
pub struct SideloadFile {
    /// Filename the asset should be stored under.
    pub name: String,
    /// Path to the readable bytes on local storage.
    pub tmp_path: PathBuf,
}

/// Field update applied to an asset's main record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub title: String,
    pub content: String,
    pub excerpt: String,
}

/// Lifecycle status filter for asset queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// Match assets in any status.
    Any,
    /// Live assets.
    Active,
    /// Soft-deleted assets the host has not purged yet.
    Trashed,
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Active => write!(f, "active"),
            Self::Trashed => write!(f, "trashed"),
        }
    }
}

/// Meta key/value predicate for asset queries.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaFilter {
    pub key: String,
    pub value: MetaValue,
}

/// Query against the host's asset store.
#[derive(Debug, Clone)]
pub struct AssetQuery {
    /// Status filter; [`AssetStatus::Any`] matches everything.
    pub status: AssetStatus,
    /// Maximum number of ids to return; `None` means unbounded.
    pub limit: Option<usize>,
    /// Restrict to assets carrying this meta key/value.
    pub meta_filter: Option<MetaFilter>,
}

impl AssetQuery {
    /// Unbounded query for assets carrying the given meta key/value, any status.
    pub fn with_meta<K: Into<String>>(key: K, value: MetaValue) -> Self {
        Self {
            status: AssetStatus::Any,
            limit: None,
            meta_filter: Some(MetaFilter {
                key: key.into(),
                value,
            }),
        }
    }
}

/// Operations the importer consumes from the surrounding host platform.
///
/// Implementations are expected to serialize their own record creation and
/// deletion internally; the importer performs no locking of its own.
pub trait HostPlatform: Send + Sync {
    /// Import a file already present on local storage into the asset store.
    ///
    /// Returns the id the host assigned to the new asset. Filename
    /// collisions are the host's to resolve.
    fn sideload(
        &self,
        file: SideloadFile,
        owner: Option<OwnerId>,
        description: &str,
    ) -> Result<AssetId, HostError>;

    /// Set a metadata value on an asset, replacing any previous value.
    fn set_meta(&self, asset: AssetId, key: &str, value: MetaValue) -> Result<(), HostError>;

    /// Read a metadata value from an asset.
    ///
    /// Returns `Ok(None)` when the asset or the key does not exist.
    fn get_meta(&self, asset: AssetId, key: &str) -> Result<Option<MetaValue>, HostError>;

    /// Update an asset's main record fields.
    fn update_record(&self, asset: AssetId, update: RecordUpdate) -> Result<(), HostError>;

    /// Return the ids of all assets matching the query.
    fn query(&self, query: &AssetQuery) -> Result<Vec<AssetId>, HostError>;

    /// Delete an asset from the store.
    fn delete(&self, asset: AssetId) -> Result<(), HostError>;

    /// Whether the named image-editing backend is available on the host.
    fn has_editor(&self, name: &str) -> bool;
}

/// Extension point for influencing the host's image editor selection.
///
/// Kept separate from [`HostPlatform`] so the importer stays decoupled from
/// the host's specific hook mechanism.
pub trait EditorRegistry: Send + Sync {
    /// Register a filter the host will call when choosing an image editor.
    fn register_editor_preference(&self, filter: EditorFilter);
}
