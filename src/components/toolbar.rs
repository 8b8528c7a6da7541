//! Toolbar Component

use leptos::prelude::*;

use crate::components::{FilePicker, SaveButton};
use crate::context::use_app_context;
use crate::store::{snap_enabled, store_set_snap, use_gallery_store};

/// Picker, snap toggle, pending counter and the save control
#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_gallery_store();

    view! {
        <div class="toolbar">
            <FilePicker />
            <label class="snap-toggle">
                <input
                    type="checkbox"
                    prop:checked=move || snap_enabled(&store)
                    on:change=move |ev| store_set_snap(&store, event_target_checked(&ev))
                />
                " Snap to grid"
            </label>
            <span class="pending-count">{move || format!("{} pending", ctx.pending_count())}</span>
            <SaveButton />
        </div>
    }
}
