//! Leptos Drag/Resize Utilities
//!
//! Free drag and eight-handle resize for absolutely placed elements, using
//! pointer events. While a gesture runs the element's style is written
//! directly; the reactive state only hears about it once, at gesture end.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub mod geometry;

pub use geometry::{
    Bounds, Constraints, GestureKind, GestureSession, Point, Rect, ResizeHandle, DEFAULT_MIN_SIZE,
    DEFAULT_SNAP_STEP,
};

struct ActiveGesture {
    session: GestureSession,
    element: web_sys::HtmlElement,
    on_commit: Callback<Rect>,
}

/// Gesture state shared by every draggable element on a page
#[derive(Clone, Copy)]
pub struct GestureState {
    active: StoredValue<Option<ActiveGesture>, LocalStorage>,
    pub is_active_read: ReadSignal<bool>,
    is_active_write: WriteSignal<bool>,
}

pub fn create_gesture_state() -> GestureState {
    let (is_active_read, is_active_write) = signal(false);
    GestureState {
        active: StoredValue::new_local(None),
        is_active_read,
        is_active_write,
    }
}

/// Position and size an element the way [`Rect`] describes it.
pub fn apply_rect(element: &web_sys::HtmlElement, rect: Rect) {
    let style = element.style();
    let _ = style.set_property("transform", &format!("translate({}px, {}px)", rect.x, rect.y));
    let _ = style.set_property("width", &format!("{}px", rect.w));
    let _ = style.set_property("height", &format!("{}px", rect.h));
}

fn pointer(ev: &web_sys::PointerEvent) -> Point {
    Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

/// Create the pointerdown handler that starts a drag (on the element body)
/// or a resize (on one of its handles).
///
/// `start` reads the committed rectangle, `constraints` the current min
/// size and snap step. The parent's size becomes the bounds.
pub fn make_on_pointerdown<S, C>(
    gestures: GestureState,
    node: NodeRef<html::Div>,
    kind: GestureKind,
    start: S,
    constraints: C,
    on_commit: Callback<Rect>,
) -> impl Fn(web_sys::PointerEvent) + Copy + 'static
where
    S: Fn() -> Rect + Copy + 'static,
    C: Fn() -> Constraints + Copy + 'static,
{
    move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        let Some(element) = node.get_untracked() else {
            return;
        };
        let element: web_sys::HtmlElement = element.unchecked_into();

        // handles sit inside the draggable body; only one gesture may start
        ev.prevent_default();
        ev.stop_propagation();

        let mut constraints = constraints();
        if let Some(parent) = element.parent_element() {
            constraints.bounds = Some(Bounds::new(parent.client_width() as f64, parent.client_height() as f64));
        }
        let session = GestureSession::begin(kind, start(), pointer(&ev), constraints);
        tracing::trace!(?kind, start = ?session.start(), "gesture started");

        gestures.active.set_value(Some(ActiveGesture {
            session,
            element,
            on_commit,
        }));
        gestures.is_active_write.set(true);
    }
}

/// Finish the running gesture, if any, and hand its rectangle to the
/// committer. Safe to call when nothing is active.
pub fn end_gesture(gestures: &GestureState) {
    let mut finished = None;
    gestures.active.update_value(|active| finished = active.take());
    let Some(active) = finished else {
        return;
    };

    let rect = active.session.finish();
    apply_rect(&active.element, rect);
    gestures.is_active_write.set(false);
    tracing::trace!(?rect, "gesture committed");
    active.on_commit.run(rect);
}

/// Bind document-level pointermove/pointerup/pointercancel once per page
pub fn bind_global_pointer_listeners(gestures: GestureState) {
    let on_move = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |ev: web_sys::PointerEvent| {
        gestures.active.update_value(|active| {
            if let Some(active) = active {
                let rect = active.session.update(pointer(&ev));
                apply_rect(&active.element, rect);
            }
        });
    });
    let on_end = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |_ev: web_sys::PointerEvent| {
        end_gesture(&gestures);
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("pointerup", on_end.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("pointercancel", on_end.as_ref().unchecked_ref());
    }
    on_move.forget();
    on_end.forget();
}
