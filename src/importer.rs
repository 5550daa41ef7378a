//! Asset importer: sideloads images into the host and cleans them up.
//!
//! [`MediaImporter`] is the crate's single coordinating service. It sniffs
//! a local image, hands it to the host's sideload mechanism, tags the
//! resulting asset with an ownership marker, and applies optional text
//! metadata. [`MediaImporter::cleanup`] later removes every asset carrying
//! the marker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::detect::{self, DetectedImage};
use crate::editors::{self, DEFAULT_PREFERRED_EDITOR};
use crate::error::Result;
use crate::host::{
    AssetQuery, EditorRegistry, HostPlatform, MetaValue, RecordUpdate, SideloadFile,
    ALT_TEXT_META_KEY,
};
use crate::ids::{AssetId, OwnerId};
use crate::sanitize::sanitize_text;

/// Configuration for a [`MediaImporter`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImporterConfig {
    /// Slug identifying this importer. The ownership marker meta key is
    /// derived from it as `_{slug}`.
    #[serde(default = "default_slug")]
    pub slug: String,

    /// Image editor preferred when the host reports it available.
    #[serde(default = "default_preferred_editor")]
    pub preferred_editor: String,
}

fn default_slug() -> String {
    "sideloader".to_string()
}

fn default_preferred_editor() -> String {
    DEFAULT_PREFERRED_EDITOR.to_string()
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            slug: default_slug(),
            preferred_editor: default_preferred_editor(),
        }
    }
}

/// Request to import one local image into the host's asset library.
///
/// All metadata fields are optional; empty strings are treated the same as
/// absent values.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Path to readable image bytes on local storage.
    pub source: PathBuf,
    /// Parent content record the asset should be attached to.
    pub owner: Option<OwnerId>,
    /// Target filename overriding the one derived from `source`.
    pub filename: Option<String>,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub alt_text: Option<String>,
    pub description: Option<String>,
}

impl ImportRequest {
    /// Create a request with the given source and no metadata.
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            source: source.into(),
            owner: None,
            filename: None,
            title: None,
            caption: None,
            alt_text: None,
            description: None,
        }
    }
}

/// Imports externally-sourced images into the host's asset library and
/// removes the ones it created.
pub struct MediaImporter {
    host: Arc<dyn HostPlatform>,
    editors: Arc<dyn EditorRegistry>,
    config: ImporterConfig,
    marker_key: String,
}

impl MediaImporter {
    /// Create a new importer against the given host and editor registry.
    pub fn new(
        host: Arc<dyn HostPlatform>,
        editors: Arc<dyn EditorRegistry>,
        config: ImporterConfig,
    ) -> Self {
        let marker_key = format!("_{}", config.slug);
        Self {
            host,
            editors,
            config,
            marker_key,
        }
    }

    /// Meta key marking assets created by this importer.
    pub fn marker_key(&self) -> &str {
        &self.marker_key
    }

    /// Import the image at `request.source` into the host's asset library.
    ///
    /// On success exactly one asset record exists, tagged with the
    /// ownership marker and carrying any requested text metadata. On
    /// failure no record is created; sideload errors from the host are
    /// returned unchanged, with no retry.
    pub fn import(&self, request: ImportRequest) -> Result<AssetId> {
        // Best-effort editor preference: ingestion proceeds either way.
        if self.host.has_editor(&self.config.preferred_editor) {
            self.editors
                .register_editor_preference(editors::preference_filter(
                    &self.config.preferred_editor,
                ));
        }

        let detected = detect::detect_image(&request.source)?;
        debug!(
            source = %request.source.display(),
            mime = detected.mime_type(),
            "Identified source image"
        );

        let name = target_filename(&request, &detected);
        let asset_id = self.host.sideload(
            SideloadFile {
                name,
                tmp_path: request.source.clone(),
            },
            request.owner,
            "",
        )?;

        self.host
            .set_meta(asset_id, &self.marker_key, MetaValue::Bool(true))?;

        let title = non_empty(request.title.as_deref());
        let caption = non_empty(request.caption.as_deref());
        let description = non_empty(request.description.as_deref());
        if title.is_some() || caption.is_some() || description.is_some() {
            self.host.update_record(
                asset_id,
                RecordUpdate {
                    title: sanitize_text(title.unwrap_or_default()),
                    content: sanitize_text(description.unwrap_or_default()),
                    excerpt: sanitize_text(caption.unwrap_or_default()),
                },
            )?;
        }

        if let Some(alt_text) = non_empty(request.alt_text.as_deref()) {
            self.host
                .set_meta(asset_id, ALT_TEXT_META_KEY, MetaValue::from(alt_text))?;
        }

        info!(asset_id = %asset_id, "Imported image into asset library");
        Ok(asset_id)
    }

    /// Delete every asset this importer created.
    ///
    /// Returns `Ok(false)` when no marked assets exist (nothing deleted),
    /// `Ok(true)` otherwise. Deletion is best-effort per record: a failed
    /// individual deletion is logged and skipped, not propagated.
    pub fn cleanup(&self) -> Result<bool> {
        let query = AssetQuery::with_meta(self.marker_key.clone(), MetaValue::Bool(true));
        let assets = self.host.query(&query)?;

        if assets.is_empty() {
            return Ok(false);
        }

        info!(count = assets.len(), "Removing assets created by this importer");
        for asset_id in assets {
            if let Err(error) = self.host.delete(asset_id) {
                warn!(asset_id = %asset_id, %error, "Failed to delete asset, continuing");
            }
        }

        Ok(true)
    }
}

/// Derive the filename the asset should be stored under.
///
/// Uses the explicit override when present, else the source's base name,
/// and appends `.<subtype>` when the name has no extension known to the
/// detected format. Covers sources fetched by URL with no extension.
fn target_filename(request: &ImportRequest, detected: &DetectedImage) -> String {
    let name = match &request.filename {
        Some(name) => name.clone(),
        None => request
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let extension = Path::new(&name)
        .extension()
        .and_then(|ext| ext.to_str());
    match extension {
        Some(ext) if detected.matches_extension(ext) => name,
        _ => format!("{}.{}", name, detected.subtype()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
