//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gallery_core::{GalleryConfig, Layout, PendingFile, PendingKey, PendingStore, SaveGate, SelectedFile};
use leptos::prelude::*;
use leptos_dragresize::{create_gesture_state, Constraints, GestureState, Rect};
use tracing::debug;

use crate::previews::BrowserPreviews;

pub type Pending = PendingStore<BrowserPreviews>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Selected images waiting to be saved
    pub pending: RwSignal<Pending>,
    /// The drag/resize gesture in progress, if any
    pub gestures: GestureState,
    /// Guards against overlapping save batches
    pub save_gate: StoredValue<SaveGate>,
    pub config: StoredValue<GalleryConfig>,
}

impl AppContext {
    pub fn new(config: GalleryConfig) -> Self {
        Self {
            pending: RwSignal::new(PendingStore::new(BrowserPreviews, config.clone())),
            gestures: create_gesture_state(),
            save_gate: StoredValue::new(SaveGate::new()),
            config: StoredValue::new(config),
        }
    }

    /// Gesture constraints for the current snap setting
    pub fn constraints(&self, snap: bool) -> Constraints {
        self.config.with_value(|config| {
            let step = snap.then_some(config.snap.step);
            Constraints::default()
                .with_min_size(config.min_size, config.min_size)
                .with_snap(step)
        })
    }

    pub fn add_files(&self, files: Vec<SelectedFile>) {
        if files.is_empty() {
            return;
        }
        self.pending.update(|pending| {
            pending.add_files(files);
        });
    }

    /// Store the rectangle a finished gesture reported
    pub fn commit_layout(&self, key: PendingKey, rect: Rect) {
        self.pending.update(|pending| {
            if !pending.update_layout(key, layout_from_rect(rect)) {
                debug!(%key, "gesture ended on an entry that is no longer pending");
            }
        });
    }

    pub fn set_caption(&self, key: PendingKey, caption: &str) {
        self.pending.update(|pending| {
            pending.set_caption(key, caption);
        });
    }

    pub fn remove_pending(&self, key: PendingKey) {
        self.pending.update(|pending| {
            pending.remove(key);
        });
    }

    pub fn pending_items(&self) -> Vec<PendingFile> {
        self.pending.with(|pending| pending.items().to_vec())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.with(|pending| pending.len())
    }

    /// Committed rectangle of a pending entry, read without tracking
    pub fn pending_rect(&self, key: PendingKey) -> Option<Rect> {
        self.pending
            .with_untracked(|pending| pending.get(key).map(|item| rect_from_layout(item.layout)))
    }

    pub fn pending_layout(&self, key: PendingKey) -> Option<Layout> {
        self.pending.with(|pending| pending.get(key).map(|item| item.layout))
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

pub fn rect_from_layout(layout: Layout) -> Rect {
    Rect::new(layout.x, layout.y, layout.w, layout.h)
}

pub fn layout_from_rect(rect: Rect) -> Layout {
    Layout::new(rect.x, rect.y, rect.w, rect.h)
}
