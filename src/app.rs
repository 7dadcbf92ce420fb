//! Org Positions Frontend App
//!
//! Header with status banners above the position tree.

use leptos::prelude::*;
use log::info;
use position_core::{Banner, TreeViewState};
use reactive_stores::Store;

use crate::components::{PositionTreeView, StatusBanner};
use crate::context::AppContext;
use crate::remote;
use crate::store::{store_apply, AppState};

#[component]
pub fn App() -> impl IntoView {
    let app_store = Store::new(AppState::default());
    provide_context(app_store);

    let view_state = signal(TreeViewState::new());
    let banner = signal::<Option<Banner>>(None);
    let ctx = AppContext::new(remote::connect(), view_state, banner);
    provide_context(ctx);

    // Mirror every reduction into the reactive store
    ctx.store()
        .subscribe(move |state| store_apply(&app_store, state));

    // Load positions on mount
    Effect::new(move |_| {
        info!("[APP] loading positions");
        ctx.load();
    });

    view! {
        <div class="app-layout">
            <main class="main-content">
                <h1>"Organization Positions"</h1>
                <StatusBanner />
                <PositionTreeView />
            </main>
        </div>
    }
}
