//! In-memory host platform.
//!
//! A complete [`HostPlatform`] + [`EditorRegistry`] implementation backed
//! by a process-local store. Used by the test suite and by embedders that
//! want importer behavior without a real content-management backend.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::editors::EditorFilter;
use crate::ids::{AssetId, OwnerId};

use super::{
    AssetQuery, AssetStatus, EditorRegistry, HostError, HostPlatform, MetaValue, RecordUpdate,
    SideloadFile,
};

/// An asset record held by [`MemoryHost`].
#[derive(Debug, Clone)]
pub struct AssetRecord {
    pub id: AssetId,
    pub filename: String,
    pub owner: Option<OwnerId>,
    pub status: AssetStatus,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub meta: HashMap<String, MetaValue>,
}

impl AssetRecord {
    fn new(id: AssetId, filename: String, owner: Option<OwnerId>) -> Self {
        Self {
            id,
            filename,
            owner,
            status: AssetStatus::Active,
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            meta: HashMap::new(),
        }
    }
}

#[derive(Default)]
struct Inner {
    assets: HashMap<AssetId, AssetRecord>,
    // Insertion order, so queries return deterministic results.
    order: Vec<AssetId>,
    filters: Vec<EditorFilter>,
    fail_sideload: Option<String>,
}

/// In-memory implementation of [`HostPlatform`] and [`EditorRegistry`].
#[derive(Default)]
pub struct MemoryHost {
    editors: Vec<String>,
    inner: RwLock<Inner>,
}

impl MemoryHost {
    /// Create an empty host with no image editors installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host reporting the given image editors as available.
    pub fn with_editors<I, S>(editors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            editors: editors.into_iter().map(Into::into).collect(),
            inner: RwLock::default(),
        }
    }

    /// Make every subsequent sideload fail with the given message.
    pub fn fail_sideloads<S: Into<String>>(&self, message: S) {
        self.inner.write().fail_sideload = Some(message.into());
    }

    /// Create an asset record directly, bypassing the importer.
    ///
    /// The record carries no metadata at all, which makes it useful for
    /// representing assets other parts of the host created.
    pub fn seed_asset(&self, filename: &str) -> AssetId {
        let id = AssetId::new();
        let mut inner = self.inner.write();
        inner
            .assets
            .insert(id, AssetRecord::new(id, filename.to_string(), None));
        inner.order.push(id);
        id
    }

    /// Change an asset's lifecycle status. Returns false for unknown ids.
    pub fn set_status(&self, asset: AssetId, status: AssetStatus) -> bool {
        match self.inner.write().assets.get_mut(&asset) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    /// Snapshot of an asset record.
    pub fn record(&self, asset: AssetId) -> Option<AssetRecord> {
        self.inner.read().assets.get(&asset).cloned()
    }

    /// Number of assets currently in the store.
    pub fn asset_count(&self) -> usize {
        self.inner.read().assets.len()
    }

    /// Number of editor preference filters registered so far.
    pub fn registered_filter_count(&self) -> usize {
        self.inner.read().filters.len()
    }

    /// The editor list after applying all registered preference filters,
    /// the way the host would when selecting an editor.
    pub fn editor_preference(&self) -> Vec<String> {
        let inner = self.inner.read();
        inner
            .filters
            .iter()
            .fold(self.editors.clone(), |editors, filter| (**filter)(editors))
    }
}

impl HostPlatform for MemoryHost {
    fn sideload(
        &self,
        file: SideloadFile,
        owner: Option<OwnerId>,
        _description: &str,
    ) -> Result<AssetId, HostError> {
        let mut inner = self.inner.write();

        if let Some(message) = &inner.fail_sideload {
            return Err(HostError::new(message.clone()));
        }

        std::fs::metadata(&file.tmp_path).map_err(|error| {
            HostError::new(format!(
                "Could not read sideloaded file {}: {error}",
                file.tmp_path.display()
            ))
        })?;

        let id = AssetId::new();
        debug!(asset_id = %id, filename = %file.name, "Sideloading file into memory store");
        inner
            .assets
            .insert(id, AssetRecord::new(id, file.name, owner));
        inner.order.push(id);
        Ok(id)
    }

    fn set_meta(&self, asset: AssetId, key: &str, value: MetaValue) -> Result<(), HostError> {
        let mut inner = self.inner.write();
        let record = inner
            .assets
            .get_mut(&asset)
            .ok_or_else(|| HostError::new(format!("No asset with id {asset}")))?;
        record.meta.insert(key.to_string(), value);
        Ok(())
    }

    fn get_meta(&self, asset: AssetId, key: &str) -> Result<Option<MetaValue>, HostError> {
        Ok(self
            .inner
            .read()
            .assets
            .get(&asset)
            .and_then(|record| record.meta.get(key).cloned()))
    }

    fn update_record(&self, asset: AssetId, update: RecordUpdate) -> Result<(), HostError> {
        let mut inner = self.inner.write();
        let record = inner
            .assets
            .get_mut(&asset)
            .ok_or_else(|| HostError::new(format!("No asset with id {asset}")))?;
        record.title = update.title;
        record.content = update.content;
        record.excerpt = update.excerpt;
        Ok(())
    }

    fn query(&self, query: &AssetQuery) -> Result<Vec<AssetId>, HostError> {
        let inner = self.inner.read();
        let matches = inner.order.iter().filter(|id| {
            let Some(record) = inner.assets.get(*id) else {
                return false;
            };
            let status_ok =
                query.status == AssetStatus::Any || record.status == query.status;
            let meta_ok = query
                .meta_filter
                .as_ref()
                .map_or(true, |filter| record.meta.get(&filter.key) == Some(&filter.value));
            status_ok && meta_ok
        });

        Ok(match query.limit {
            Some(limit) => matches.take(limit).copied().collect(),
            None => matches.copied().collect(),
        })
    }

    fn delete(&self, asset: AssetId) -> Result<(), HostError> {
        let mut inner = self.inner.write();
        if inner.assets.remove(&asset).is_none() {
            return Err(HostError::new(format!("Cannot delete unknown asset {asset}")));
        }
        inner.order.retain(|id| *id != asset);
        Ok(())
    }

    fn has_editor(&self, name: &str) -> bool {
        self.editors.iter().any(|editor| editor == name)
    }
}

impl EditorRegistry for MemoryHost {
    fn register_editor_preference(&self, filter: EditorFilter) {
        self.inner.write().filters.push(filter);
    }
}
