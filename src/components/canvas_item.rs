//! Canvas Item Components
//!
//! Pending items can be dragged and resized from eight handles. Persisted
//! items are placed from their stored layout and never move.

use gallery_core::{GalleryItem, PendingKey};
use leptos::html;
use leptos::prelude::*;
use leptos_dragresize::{make_on_pointerdown, GestureKind, Rect, ResizeHandle, DEFAULT_MIN_SIZE};

use crate::context::use_app_context;
use crate::store::{snap_enabled_untracked, use_gallery_store};

#[component]
pub fn PendingCanvasItem(
    pending_key: PendingKey,
    #[prop(into)] preview_url: String,
    #[prop(into)] file_name: String,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_gallery_store();
    let node = NodeRef::<html::Div>::new();

    let start = move || {
        ctx.pending_rect(pending_key)
            .unwrap_or_else(|| Rect::new(0.0, 0.0, DEFAULT_MIN_SIZE, DEFAULT_MIN_SIZE))
    };
    let constraints = move || ctx.constraints(snap_enabled_untracked(&store));
    let on_commit = Callback::new(move |rect: Rect| ctx.commit_layout(pending_key, rect));

    let on_drag = make_on_pointerdown(ctx.gestures, node, GestureKind::Drag, start, constraints, on_commit);
    let style = move || {
        ctx.pending_layout(pending_key)
            .map(|layout| layout.to_style())
            .unwrap_or_default()
    };

    let handles = ResizeHandle::ALL
        .into_iter()
        .map(|handle| {
            let on_resize = make_on_pointerdown(
                ctx.gestures,
                node,
                GestureKind::Resize(handle),
                start,
                constraints,
                on_commit,
            );
            view! { <div class=format!("resize-handle handle-{}", handle.compass()) on:pointerdown=on_resize /> }
        })
        .collect_view();

    view! {
        <div
            node_ref=node
            class="canvas-item pending"
            style=style
            on:pointerdown=on_drag
        >
            <img src=preview_url alt=file_name draggable="false" />
            {handles}
        </div>
    }
}

#[component]
pub fn GalleryCanvasItem(item: GalleryItem) -> impl IntoView {
    let caption = item.caption.clone();

    view! {
        <figure class="canvas-item persisted" style=item.layout.to_style()>
            <img src=item.url alt=item.file_name draggable="false" />
            {caption.map(|text| view! { <figcaption>{text}</figcaption> })}
        </figure>
    }
}
