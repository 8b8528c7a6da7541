//! File Picker Component
//!
//! Multi-select image input. Files are read into memory before they
//! enter the pending list, in the order the browser reports them.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

use crate::context::use_app_context;
use crate::files::{read_files, take_selected};

#[component]
pub fn FilePicker() -> impl IntoView {
    let ctx = use_app_context();
    let input = NodeRef::<html::Input>::new();

    let on_change = move |_| {
        let Some(element) = input.get_untracked() else {
            return;
        };
        let files = take_selected(&element);
        if files.is_empty() {
            return;
        }
        spawn_local(async move {
            let selected = read_files(files).await;
            debug!(count = selected.len(), "files selected");
            ctx.add_files(selected);
        });
    };

    view! {
        <label class="file-picker">
            <input
                node_ref=input
                class="file-input"
                type="file"
                accept="image/*"
                multiple=true
                on:change=on_change
            />
            "Add images"
        </label>
    }
}
