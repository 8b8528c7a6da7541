//! Save Button Component
//!
//! Runs one save batch at a time. Items leave the pending list as soon as
//! their document is written, so a failed batch leaves exactly the unsaved
//! tail behind.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, error, info};

use crate::context::use_app_context;
use crate::remote;
use crate::store::{is_saving, store_set_saving, use_gallery_store};

#[component]
pub fn SaveButton() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_gallery_store();

    let label = move || {
        if is_saving(&store) {
            "Saving...".to_string()
        } else {
            format!("Save {} images", ctx.pending_count())
        }
    };
    let disabled = move || ctx.pending_count() == 0 || is_saving(&store);

    let on_click = move |_| {
        let Some(backend) = remote::backend() else {
            error!("no gallery backend configured, nothing saved");
            return;
        };
        let Some(ticket) = ctx.save_gate.with_value(|gate| gate.try_acquire()) else {
            debug!("save already running");
            return;
        };
        let batch = ctx.pending.with_untracked(|pending| pending.batch());
        if batch.is_empty() {
            return;
        }

        store_set_saving(&store, true);
        spawn_local(async move {
            let _ticket = ticket;
            let result = backend
                .save(&batch, |key, _id| {
                    ctx.pending.update(|pending| {
                        pending.mark_saved(key);
                    });
                })
                .await;
            match result {
                Ok(report) => info!(saved = report.document_ids.len(), "save batch finished"),
                Err(err) => error!(
                    index = err.index,
                    file = %err.file_name,
                    saved = err.saved,
                    error = %err.source,
                    "save batch aborted"
                ),
            }
            store_set_saving(&store, false);
        });
    };

    view! {
        <button class="save-btn" disabled=disabled on:click=on_click>
            {label}
        </button>
    }
}
