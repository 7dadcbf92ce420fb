//! Position Form Component
//!
//! Create or edit form; validation runs before anything is dispatched.

use leptos::prelude::*;
use position_core::{Field, FormSurface};

use crate::context::AppContext;

/// Form for creating (root or child) or editing a position
#[component]
pub fn PositionForm(
    /// Surface opened by the caller, with the starting draft
    surface: FormSurface,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let surface = RwSignal::new(surface);

    let is_edit = surface.with_untracked(|s| s.draft().is_some_and(|d| d.is_edit()));
    let is_child = surface.with_untracked(|s| s.draft().is_some_and(|d| d.parent_id.is_some()));
    let submit_label = if is_edit { "Save" } else { "Add" };
    let name_placeholder = match (is_edit, is_child) {
        (true, _) => "Position name",
        (false, true) => "New child position name",
        (false, false) => "New root position name",
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        // The draft stays put until the save succeeds and focus moves on
        let mut submission = None;
        surface.update(|s| submission = s.validated());
        if let Some(submission) = submission {
            ctx.save(submission);
        }
    };

    let on_cancel = move |_| {
        surface.update(|s| s.cancel());
        ctx.clear_focus();
    };

    let value = move |field: Field| {
        surface.with(|s| {
            s.draft()
                .map(|d| match field {
                    Field::Name => d.name.clone(),
                    Field::Description => d.description.clone(),
                })
                .unwrap_or_default()
        })
    };
    let error = move |field: Field| {
        surface
            .with(|s| s.error(field))
            .map(|msg| view! { <span class="field-error">{msg}</span> })
    };

    view! {
        <form class="position-form" on:submit=on_submit on:click=|ev| ev.stop_propagation()>
            <div class="form-row">
                <input
                    type="text"
                    name="name"
                    placeholder=name_placeholder
                    prop:value=move || value(Field::Name)
                    on:input=move |ev| surface.update(|s| s.set_field(Field::Name, event_target_value(&ev)))
                />
                {move || error(Field::Name)}
            </div>
            <div class="form-row">
                <textarea
                    name="description"
                    placeholder="Description"
                    prop:value=move || value(Field::Description)
                    on:input=move |ev| surface.update(|s| s.set_field(Field::Description, event_target_value(&ev)))
                />
                {move || error(Field::Description)}
            </div>
            <div class="form-actions">
                <button type="submit">{submit_label}</button>
                <button type="button" class="cancel-btn" on:click=on_cancel>"Cancel"</button>
            </div>
        </form>
    }
}
