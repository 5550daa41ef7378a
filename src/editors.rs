//! Image editor preference.
//!
//! The host platform chooses between its available image-editing backends
//! when it post-processes a sideloaded image. This module provides the
//! reordering applied when the importer's preferred backend is available,
//! and the callback type registered with the host's extension point.

use std::sync::Arc;

/// Callback the host invokes when selecting an image editor.
///
/// Receives the host's ordered editor list and returns the reordered list.
pub type EditorFilter = Arc<dyn Fn(Vec<String>) -> Vec<String> + Send + Sync>;

/// Editor backend the importer prefers by default.
pub const DEFAULT_PREFERRED_EDITOR: &str = "gd";

/// Move `preferred` to the front of the editor list.
///
/// The relative order of the remaining editors is preserved. `preferred` is
/// always placed first, even when the input list did not contain it.
/// Deterministic and idempotent.
pub fn prefer_editor(editors: Vec<String>, preferred: &str) -> Vec<String> {
    let mut reordered: Vec<String> = editors.into_iter().filter(|e| e != preferred).collect();
    reordered.insert(0, preferred.to_string());
    reordered
}

/// Build an [`EditorFilter`] that applies [`prefer_editor`] for `preferred`.
pub fn preference_filter(preferred: &str) -> EditorFilter {
    let preferred = preferred.to_string();
    Arc::new(move |editors| prefer_editor(editors, &preferred))
}
