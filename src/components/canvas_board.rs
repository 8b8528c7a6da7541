//! Canvas Board Component
//!
//! The bounded surface items are laid out on. Pending work takes over the
//! board; with nothing pending it shows the saved gallery.

use leptos::prelude::*;

use crate::components::{GalleryCanvasItem, PendingCanvasItem};
use crate::context::use_app_context;
use crate::store::{has_persisted, persisted_items, snap_enabled, use_gallery_store};

#[component]
pub fn CanvasBoard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_gallery_store();
    let size = ctx.config.with_value(|config| config.canvas);

    let has_pending = move || ctx.pending_count() > 0;

    view! {
        <div
            class="canvas-board"
            class:snap=move || snap_enabled(&store)
            class:gesturing=move || ctx.gestures.is_active_read.get()
            style=format!("width: {}px; height: {}px;", size.width, size.height)
        >
            <Show when=has_pending fallback=move || view! { <SavedGallery /> }>
                <For
                    each=move || ctx.pending_items()
                    key=|item| item.key
                    children=|item| {
                        view! {
                            <PendingCanvasItem
                                pending_key=item.key
                                preview_url=item.preview.url().to_string()
                                file_name=item.file.name.clone()
                            />
                        }
                    }
                />
            </Show>
        </div>
    }
}

/// Persisted items, newest first
#[component]
fn SavedGallery() -> impl IntoView {
    let store = use_gallery_store();

    view! {
        <Show
            when=move || has_persisted(&store)
            fallback=|| view! { <p class="canvas-hint">"Add images to start a layout"</p> }
        >
            <For
                each=move || persisted_items(&store)
                key=|item| item.id.clone()
                children=|item| view! { <GalleryCanvasItem item=item /> }
            />
        </Show>
    }
}
