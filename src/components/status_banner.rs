//! Status Banner Component
//!
//! Transient success/error banner plus the store's loading and failure state.

use leptos::prelude::*;
use position_core::{BannerKind, Status};

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn StatusBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let status_line = move || match store.status().get() {
        Status::Loading => Some(view! { <p class="status loading">"Loading..."</p> }.into_any()),
        Status::Failed => store.error().get().map(|err| {
            view! { <p class="status failed">{format!("Error: {}", err)}</p> }.into_any()
        }),
        Status::Idle | Status::Succeeded => None,
    };

    view! {
        {move || ctx.banner.get().map(|banner| {
            let class = match banner.kind {
                BannerKind::Success => "banner success",
                BannerKind::Error => "banner error",
            };
            view! {
                <div class=class role="status" on:click=move |_| ctx.dismiss()>
                    {banner.message}
                </div>
            }
        })}
        {status_line}
    }
}
