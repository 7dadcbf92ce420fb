//! Position Details Component
//!
//! Read-only card for the selected row.

use leptos::prelude::*;
use position_core::Position;

use crate::context::AppContext;
use crate::store::{store_position_name, use_app_store};

#[component]
pub fn PositionDetails(
    position: Position,
    /// Direct children
    reports: usize,
    /// All descendants
    total_reports: usize,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let parent = match &position.parent_id {
        None => "None (root)".to_string(),
        Some(id) => store_position_name(&store, id).unwrap_or_else(|| format!("Missing ({})", id)),
    };

    view! {
        <div class="position-details" on:click=|ev| ev.stop_propagation()>
            <dl>
                <dt>"Name"</dt>
                <dd>{position.name.clone()}</dd>
                <dt>"Description"</dt>
                <dd>{position.description.clone()}</dd>
                <dt>"Reports to"</dt>
                <dd>{parent}</dd>
                <dt>"Direct reports"</dt>
                <dd>{reports}</dd>
                <dt>"Total reports"</dt>
                <dd>{total_reports}</dd>
            </dl>
            <button class="close-btn" on:click=move |_| ctx.clear_focus()>"Close"</button>
        </div>
    }
}
