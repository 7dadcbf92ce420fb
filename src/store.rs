//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Mirrors the
//! position store after each reduction.

use leptos::prelude::*;
use position_core::{Position, PositionState, Status};
use reactive_stores::Store;

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Canonical flat list
    pub positions: Vec<Position>,
    pub status: Status,
    /// Last failure text
    pub error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Copy a reduced position state into the reactive store
pub fn store_apply(store: &AppStore, state: &PositionState) {
    *store.positions().write() = state.positions.clone();
    *store.status().write() = state.status;
    *store.error().write() = state.error.clone();
}

/// Name of a position by id, for display
pub fn store_position_name(store: &AppStore, id: &str) -> Option<String> {
    store
        .positions()
        .read()
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.clone())
}
