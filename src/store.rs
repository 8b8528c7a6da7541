//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gallery_core::GalleryItem;
use leptos::prelude::*;
use reactive_stores::Store;

/// Read-only gallery projection plus UI flags
#[derive(Clone, Debug, Default, Store)]
pub struct GalleryState {
    /// Persisted items, newest first, replaced on every snapshot
    pub persisted: Vec<GalleryItem>,
    /// A save batch is running
    pub saving: bool,
    /// Snap gestures to the grid
    pub snap_to_grid: bool,
}

impl GalleryState {
    pub fn new(snap_to_grid: bool) -> Self {
        Self {
            snap_to_grid,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type GalleryStore = Store<GalleryState>;

/// Get the gallery store from context
pub fn use_gallery_store() -> GalleryStore {
    expect_context::<GalleryStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the persisted list with a fresh snapshot
pub fn store_replace_persisted(store: &GalleryStore, items: Vec<GalleryItem>) {
    *store.persisted().write() = items;
}

pub fn persisted_items(store: &GalleryStore) -> Vec<GalleryItem> {
    store.persisted().get()
}

pub fn has_persisted(store: &GalleryStore) -> bool {
    store.persisted().with(|items| !items.is_empty())
}

pub fn store_set_saving(store: &GalleryStore, saving: bool) {
    *store.saving().write() = saving;
}

pub fn is_saving(store: &GalleryStore) -> bool {
    store.saving().get()
}

pub fn store_set_snap(store: &GalleryStore, enabled: bool) {
    *store.snap_to_grid().write() = enabled;
}

pub fn snap_enabled(store: &GalleryStore) -> bool {
    store.snap_to_grid().get()
}

/// Snap flag without subscribing, for use inside gesture handlers
pub fn snap_enabled_untracked(store: &GalleryStore) -> bool {
    store.snap_to_grid().get_untracked()
}
