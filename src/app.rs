//! Gallery Canvas App
//!
//! Toolbar on top, the canvas board, and the pending list underneath.

use gallery_core::Subscription;
use leptos::prelude::*;
use leptos_dragresize::bind_global_pointer_listeners;
use reactive_stores::Store;
use tracing::error;

use crate::components::{CanvasBoard, PendingList, Toolbar};
use crate::config;
use crate::context::AppContext;
use crate::remote;
use crate::store::{store_replace_persisted, GalleryState};

#[component]
pub fn App() -> impl IntoView {
    let config = config::load();

    let store = Store::new(GalleryState::new(config.gallery.snap.enabled));
    provide_context(store);

    let ctx = AppContext::new(config.gallery.clone());
    provide_context(ctx);
    bind_global_pointer_listeners(ctx.gestures);

    // Persisted gallery: every snapshot replaces the list wholesale
    let subscription = StoredValue::new_local(None::<Subscription>);
    match remote::connect(&config) {
        Ok(backend) => {
            let live = backend.subscribe(Box::new(move |items| store_replace_persisted(&store, items)));
            subscription.set_value(Some(live));
        }
        Err(err) => error!(error = %err, "gallery backend unavailable, saving is disabled"),
    }

    on_cleanup(move || {
        subscription.try_update_value(|live| drop(live.take()));
        ctx.pending.try_update_untracked(|pending| pending.clear());
    });

    view! {
        <div class="gallery-app">
            <Toolbar />
            <CanvasBoard />
            <PendingList />
        </div>
    }
}
