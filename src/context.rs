//! Application Context
//!
//! Shared state provided via Leptos Context API. Owns the position store and
//! runs its actions, turning outcomes into banners and view-state changes.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use position_core::form::apply_submission;
use position_core::{
    would_create_cycle, Action, Banner, PositionRepository, PositionStore, Submission,
    TreeViewState, BANNER_TIMEOUT_MS,
};

pub type SharedStore = PositionStore<dyn PositionRepository>;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    store: StoredValue<SharedStore, LocalStorage>,
    /// Expanded nodes and focus - read
    pub view: ReadSignal<TreeViewState>,
    /// Expanded nodes and focus - write
    set_view: WriteSignal<TreeViewState>,
    /// Current banner - read
    pub banner: ReadSignal<Option<Banner>>,
    /// Current banner - write
    set_banner: WriteSignal<Option<Banner>>,
    /// Bumped per banner so a stale timer never clears a newer one
    banner_seq: StoredValue<u32>,
}

impl AppContext {
    pub fn new(
        repo: Rc<dyn PositionRepository>,
        view: (ReadSignal<TreeViewState>, WriteSignal<TreeViewState>),
        banner: (ReadSignal<Option<Banner>>, WriteSignal<Option<Banner>>),
    ) -> Self {
        Self {
            store: StoredValue::new_local(PositionStore::new(repo)),
            view: view.0,
            set_view: view.1,
            banner: banner.0,
            set_banner: banner.1,
            banner_seq: StoredValue::new(0),
        }
    }

    pub fn store(&self) -> SharedStore {
        self.store.get_value()
    }

    // ========================
    // View state
    // ========================

    pub fn update_view(&self, f: impl FnOnce(&mut TreeViewState)) {
        self.set_view.update(f);
    }

    pub fn clear_focus(&self) {
        self.set_view.update(|v| v.clear_focus());
    }

    // ========================
    // Banners
    // ========================

    /// Show a banner and schedule its dismissal
    pub fn notify(&self, banner: Banner) {
        self.banner_seq.update_value(|s| *s = s.wrapping_add(1));
        let seq = self.banner_seq.get_value();
        self.set_banner.set(Some(banner));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(BANNER_TIMEOUT_MS).await;
            if ctx.banner_seq.get_value() == seq {
                ctx.set_banner.set(None);
            }
        });
    }

    pub fn dismiss(&self) {
        self.set_banner.set(None);
    }

    // ========================
    // Store actions
    // ========================

    /// Initial load; a no-op once anything has been dispatched
    pub fn load(&self) {
        let ctx = *self;
        spawn_local(async move {
            if let Err(e) = ctx.store().ensure_loaded().await {
                ctx.notify(Banner::failure(Action::Load, &e));
            }
        });
    }

    pub fn reload(&self) {
        let ctx = *self;
        spawn_local(async move {
            match ctx.store().fetch().await {
                Ok(()) => ctx.sync_view(),
                Err(e) => ctx.notify(Banner::failure(Action::Load, &e)),
            }
        });
    }

    /// Dispatch a validated create or update
    pub fn save(&self, submission: Submission) {
        let ctx = *self;
        let action = submission.action();
        let parent = match &submission {
            Submission::Create(new) => new.parent_id.clone(),
            Submission::Update(_) => None,
        };
        spawn_local(async move {
            let result = apply_submission(&ctx.store(), submission).await;
            if result.is_ok() {
                ctx.set_view.update(|v| {
                    v.clear_focus();
                    // Keep the new child visible
                    if let Some(parent) = &parent {
                        v.expand(parent);
                    }
                });
            }
            ctx.notify(Banner::from_result(action, &result));
        });
    }

    /// Delete one position; its descendants stay and become orphans
    pub fn delete(&self, id: String) {
        let ctx = *self;
        spawn_local(async move {
            let result = ctx.store().delete(&id).await;
            if result.is_ok() {
                ctx.sync_view();
            }
            ctx.notify(Banner::from_result(Action::Delete, &result));
        });
    }

    /// Re-parent a position, refusing moves under itself or its descendants
    pub fn move_to(&self, id: String, new_parent: Option<String>) {
        let store = self.store();
        let positions = store.positions();
        let Some(position) = positions.iter().find(|p| p.id == id).cloned() else {
            warn!("[DND] dragged position {} is gone", id);
            return;
        };
        if position.parent_id == new_parent {
            return;
        }
        if would_create_cycle(&positions, &id, new_parent.as_deref()) {
            self.notify(Banner::error(
                "Cannot move a position under itself or one of its descendants.",
            ));
            return;
        }
        debug!("[DND] moving {} under {:?}", id, new_parent);

        let ctx = *self;
        spawn_local(async move {
            let moved = position.reparented(new_parent.clone());
            let result = store.update(moved).await;
            if result.is_ok() {
                if let Some(parent) = &new_parent {
                    ctx.set_view.update(|v| v.expand(parent));
                }
            }
            ctx.notify(Banner::from_result(Action::Move, &result));
        });
    }

    /// Drop view state for positions that no longer exist
    fn sync_view(&self) {
        let positions = self.store().positions();
        self.set_view.update(|v| v.retain_existing(&positions));
    }
}
