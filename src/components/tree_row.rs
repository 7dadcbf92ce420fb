//! Tree Row Component
//!
//! One position in the tree, with its inline detail card or form.

use leptos::prelude::*;
use leptos_dragdrop::*;
use position_core::{Focus, Forest, FormSurface, TreeRow};

use crate::components::{DeleteConfirmButton, PositionDetails, PositionForm};
use crate::context::AppContext;

/// What this row shows below itself
#[derive(Clone, Copy, PartialEq, Eq)]
enum RowFocus {
    None,
    Viewing,
    Editing,
    AddingChild,
}

/// A single position row in the tree
#[component]
pub fn TreeRowView(row: TreeRow, forest: Memo<Forest>, dnd: DndSignals) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let TreeRow { position, depth, has_children } = row;
    let id = position.id.clone();
    let indent = depth * 24;

    let focus = {
        let id = id.clone();
        Memo::new(move |_| {
            ctx.view.with(|v| match v.focus() {
                Focus::Viewing(f) if *f == id => RowFocus::Viewing,
                Focus::Editing(f) if *f == id => RowFocus::Editing,
                Focus::AddingChild(f) if *f == id => RowFocus::AddingChild,
                _ => RowFocus::None,
            })
        })
    };

    let is_expanded = {
        let id = id.clone();
        move || ctx.view.with(|v| v.is_expanded(&id))
    };

    let row_class = {
        let id = id.clone();
        move || {
            let mut c = String::from("tree-row-wrapper");
            if focus.get() != RowFocus::None { c.push_str(" selected"); }
            if dnd.is_dragging_node(&id) { c.push_str(" dragging"); }
            if dnd.is_node_target(&id) { c.push_str(" drop-target"); }
            c
        }
    };

    let on_select = {
        let id = id.clone();
        move |_| {
            // The click that ends a drag is not a selection
            if !dnd.drag_just_ended_read.get_untracked() {
                ctx.update_view(|v| v.select(&id));
            }
        }
    };
    let on_toggle = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            ctx.update_view(|v| {
                v.toggle(&id);
            });
        }
    };
    let on_add_child = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            ctx.update_view(|v| {
                v.add_child(&id);
                v.expand(&id);
            });
        }
    };
    let on_edit = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            ctx.update_view(|v| v.edit(&id));
        }
    };
    let on_delete = {
        let id = id.clone();
        Callback::new(move |_| ctx.delete(id.clone()))
    };

    let panel = {
        let id = id.clone();
        let position = position.clone();
        move || match focus.get() {
            RowFocus::None => ().into_any(),
            RowFocus::Editing => view! {
                <PositionForm surface=FormSurface::open_edit(&position) />
            }
            .into_any(),
            RowFocus::AddingChild => view! {
                <PositionForm surface=FormSurface::open_create(Some(id.clone())) />
            }
            .into_any(),
            RowFocus::Viewing => {
                let (reports, total) = forest.with(|f| {
                    f.find(&id)
                        .map(|node| (node.children.len(), node.descendant_count()))
                        .unwrap_or((0, 0))
                });
                view! {
                    <PositionDetails position=position.clone() reports=reports total_reports=total />
                }
                .into_any()
            }
        }
    };

    view! {
        <div
            class=row_class
            on:mousedown=make_on_mousedown(dnd, id.clone())
            on:mouseenter=make_on_node_mouseenter(dnd, id.clone())
            on:mouseleave=make_on_mouseleave(dnd)
            on:click=on_select
        >
            <div class="position-row" style=format!("margin-left: {}px;", indent)>
                {if has_children {
                    view! {
                        <button class="collapse-btn" on:click=on_toggle>
                            {move || if is_expanded() { "▼" } else { "▶" }}
                        </button>
                    }.into_any()
                } else {
                    view! { <span class="collapse-placeholder">"·"</span> }.into_any()
                }}

                <span class="position-name">{position.name.clone()}</span>
                <span class="position-description">{position.description.clone()}</span>

                <button class="add-child-btn" title="Add child position" on:click=on_add_child>"+"</button>
                <button class="edit-btn" title="Edit" on:click=on_edit>"✎"</button>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
            </div>
        </div>
        <div class="row-panel" style=format!("margin-left: {}px;", indent + 24)>
            {panel}
        </div>
    }
}
