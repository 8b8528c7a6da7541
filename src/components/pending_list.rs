//! Pending List Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{is_saving, use_gallery_store};

/// One row per pending image: name, caption and a remove button
#[component]
pub fn PendingList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_gallery_store();

    view! {
        <ul class="pending-list">
            <For
                each=move || ctx.pending_items()
                key=|item| item.key
                children=move |item| {
                    let key = item.key;
                    view! {
                        <li class="pending-row">
                            <span class="pending-name">{item.file.name.clone()}</span>
                            <input
                                class="caption-input"
                                type="text"
                                placeholder="Caption"
                                prop:value=item.caption.clone().unwrap_or_default()
                                on:input=move |ev| ctx.set_caption(key, &event_target_value(&ev))
                            />
                            <button
                                class="remove-btn"
                                title="Remove"
                                disabled=move || is_saving(&store)
                                on:click=move |_| ctx.remove_pending(key)
                            >
                                "×"
                            </button>
                        </li>
                    }
                }
            />
        </ul>
    }
}
