//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop on a node (become its child)
    Node(String),
    /// Drop on the root zone (become a root)
    Root,
}

impl DropTarget {
    /// Parent the dragged node gets when dropped here
    pub fn new_parent(&self) -> Option<&str> {
        match self {
            DropTarget::Node(id) => Some(id),
            DropTarget::Root => None,
        }
    }

    pub fn is_node(&self, id: &str) -> bool {
        matches!(self, DropTarget::Node(target) if target == id)
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<String>>,
    pub dragging_id_write: WriteSignal<Option<String>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending node id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<String>>,
    pub pending_id_write: WriteSignal<Option<String>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Whether the pointer moved far enough from the mousedown point
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<String>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<String>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

impl DndSignals {
    pub fn is_dragging(&self) -> bool {
        self.dragging_id_read.with(Option::is_some)
    }

    pub fn is_dragging_node(&self, id: &str) -> bool {
        self.dragging_id_read.with(|d| d.as_deref() == Some(id))
    }

    pub fn is_target(&self, target: &DropTarget) -> bool {
        self.drop_target_read.with(|t| t.as_ref() == Some(target))
    }

    /// Whether the pointer is over this node mid-drag
    pub fn is_node_target(&self, id: &str) -> bool {
        self.drop_target_read.with(|t| t.as_ref().is_some_and(|t| t.is_node(id)))
    }
}

/// Whether the click that follows a mouseup should be swallowed.
/// Only a drag that crossed the threshold does; a plain click selects.
pub fn suppresses_click(was_dragging: bool) -> bool {
    was_dragging
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    let was_dragging = dnd.dragging_id_read.with_untracked(Option::is_some);
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);

    if !suppresses_click(was_dragging) {
        return;
    }
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable nodes
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, node_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is a form control
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(node_id.clone()));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();

        if pending.is_some() && dnd.dragging_id_read.with_untracked(Option::is_none) {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_id_write.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for nodes (become child target)
pub fn make_on_node_mouseenter(dnd: DndSignals, node_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        let over_other = dnd
            .dragging_id_read
            .with_untracked(|d| d.as_ref().is_some_and(|dragging| *dragging != node_id));
        // Never target the dragged node itself
        if over_other {
            dnd.drop_target_write.set(Some(DropTarget::Node(node_id.clone())));
        }
    }
}

/// Create mouseenter handler for the root zone
pub fn make_on_root_mouseenter(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(Some(DropTarget::Root));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(String, DropTarget) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        dnd.pending_id_write.set(None);
        end_drag(&dnd);

        // Only a real drag drops; a plain click falls through to the element
        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            on_drop(dragged, target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_parent() {
        assert_eq!(DropTarget::Node("ceo".into()).new_parent(), Some("ceo"));
        assert_eq!(DropTarget::Root.new_parent(), None);
    }

    #[test]
    fn test_is_node() {
        assert!(DropTarget::Node("cto".into()).is_node("cto"));
        assert!(!DropTarget::Node("cto".into()).is_node("ceo"));
        assert!(!DropTarget::Root.is_node("cto"));
    }

    #[test]
    fn test_plain_click_is_not_suppressed() {
        assert!(!suppresses_click(false));
        assert!(suppresses_click(true));
    }

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (15, 14)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }
}
