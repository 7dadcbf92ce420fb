//! Delete Confirm Button Component
//!
//! Delete button that asks the browser for confirmation first.

use leptos::prelude::*;

const CONFIRM_MESSAGE: &str = "Are you sure you want to delete this position?";

fn confirmed() -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(CONFIRM_MESSAGE).ok())
        .unwrap_or(false)
}

/// Delete button guarded by `window.confirm`
///
/// # Arguments
/// * `button_class` - CSS class for the button
/// * `on_confirm` - Callback to execute when user confirms deletion
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class=button_class
            title="Delete"
            on:click=move |ev| {
                ev.stop_propagation();
                if confirmed() {
                    on_confirm.run(());
                }
            }
        >
            "×"
        </button>
    }
}
