//! Position Tree View Component
//!
//! Renders the forest derived from the flat list, with drag-and-drop
//! re-parenting and a panel listing data issues.

use leptos::prelude::*;
use leptos_dragdrop::*;
use position_core::{build_tree, Focus, FormSurface, Status, TreeIssue};

use crate::components::{PositionForm, TreeRowView};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn PositionTreeView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    // Derived, never stored
    let forest = Memo::new(move |_| build_tree(&store.positions().read()));

    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |dragged, target| {
        ctx.move_to(dragged, target.new_parent().map(str::to_string));
    });

    let rows = move || forest.with(|f| ctx.view.with(|v| f.visible_rows(v.expanded())));
    let can_expand = move || forest.with(|f| !f.expandable_ids().is_empty());
    let all_expanded = move || forest.with(|f| ctx.view.with(|v| v.all_expanded(f)));
    let toggle_all = move |_| forest.with_untracked(|f| ctx.update_view(|v| v.toggle_all(f)));
    let adding_root = move || ctx.view.with(|v| *v.focus() == Focus::AddingRoot);
    let is_empty = move || {
        store.status().get() == Status::Succeeded && store.positions().read().is_empty()
    };

    let root_zone_class = move || {
        let mut c = String::from("drop-zone root-drop-zone");
        if !dnd.is_dragging() { c.push_str(" hidden"); }
        if dnd.is_target(&DropTarget::Root) { c.push_str(" active"); }
        c
    };

    let issues_panel = move || {
        let (issues, hidden) = forest.with(|f| {
            let issues: Vec<String> = f.issues().iter().map(TreeIssue::describe).collect();
            (issues, f.hidden_ids().len())
        });
        (!issues.is_empty()).then(|| view! {
            <div class="tree-issues">
                <h3>{format!("Data issues ({} hidden)", hidden)}</h3>
                <ul>
                    {issues.into_iter().map(|issue| view! { <li>{issue}</li> }).collect_view()}
                </ul>
            </div>
        })
    };

    view! {
        <div class="tree-view">
            <div class="tree-toolbar">
                <button on:click=move |_| ctx.update_view(|v| v.add_root())>"Add root position"</button>
                <button on:click=toggle_all disabled=move || !can_expand()>
                    {move || if all_expanded() { "Collapse all" } else { "Expand all" }}
                </button>
                <button on:click=move |_| ctx.reload()>"Reload"</button>
            </div>

            <Show when=adding_root>
                <PositionForm surface=FormSurface::open_create(None) />
            </Show>

            <div
                class=root_zone_class
                on:mouseenter=make_on_root_mouseenter(dnd)
                on:mouseleave=make_on_mouseleave(dnd)
            >
                "Drop here to make it a root position"
            </div>

            <Show when=is_empty>
                <p class="empty-tree">"No positions yet."</p>
            </Show>

            <For
                each=rows
                key=|row| {
                    (
                        row.position.id.clone(),
                        row.position.name.clone(),
                        row.position.description.clone(),
                        row.position.parent_id.clone(),
                        row.depth,
                        row.has_children,
                    )
                }
                children=move |row| view! { <TreeRowView row=row forest=forest dnd=dnd /> }
            />

            {issues_panel}
        </div>
    }
}
