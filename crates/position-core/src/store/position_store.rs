//! Store Actions
//!
//! Async fetch/add/update/delete. Every action sets `Loading` on dispatch and
//! reduces its own completion; with several actions in flight the status is
//! whatever settled last.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use super::state::{PositionState, Status, StoreEvent};
use crate::domain::{DomainError, DomainResult, NewPosition, Position};
use crate::repository::PositionRepository;

type Listener = Rc<dyn Fn(&PositionState)>;

/// Explicitly owned store; clones share the same state
pub struct PositionStore<R: ?Sized> {
    repo: Rc<R>,
    state: Rc<RefCell<PositionState>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl<R: ?Sized> Clone for PositionStore<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Rc::clone(&self.repo),
            state: Rc::clone(&self.state),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<R: PositionRepository + ?Sized> PositionStore<R> {
    pub fn new(repo: Rc<R>) -> Self {
        Self {
            repo,
            state: Rc::new(RefCell::new(PositionState::new())),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PositionState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status
    }

    pub fn positions(&self) -> Vec<Position> {
        self.state.borrow().positions.clone()
    }

    /// Called with the new state after every reduction
    pub fn subscribe(&self, listener: impl Fn(&PositionState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn dispatch(&self, event: StoreEvent) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.reduce(event);
            state.clone()
        };
        debug!(
            "[STORE] status={} positions={}",
            snapshot.status.as_str(),
            snapshot.positions.len()
        );

        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn reject(&self, action: &str, err: &DomainError) {
        warn!("[STORE] {} failed: {}", action, err);
        self.dispatch(StoreEvent::Rejected(err.to_string()));
    }

    /// Replace the list with everything in the remote store
    pub async fn fetch(&self) -> DomainResult<()> {
        debug!("[STORE] fetch dispatched");
        self.dispatch(StoreEvent::Pending);
        match self.repo.fetch_all().await {
            Ok(positions) => {
                self.dispatch(StoreEvent::Fetched(positions));
                Ok(())
            }
            Err(e) => {
                self.reject("fetch", &e);
                Err(e)
            }
        }
    }

    /// Fetch only if nothing has been dispatched yet
    pub async fn ensure_loaded(&self) -> DomainResult<()> {
        if self.status() == Status::Idle {
            self.fetch().await
        } else {
            Ok(())
        }
    }

    pub async fn add(&self, position: NewPosition) -> DomainResult<Position> {
        debug!("[STORE] add dispatched: {}", position.name);
        self.dispatch(StoreEvent::Pending);
        match self.repo.create(&position).await {
            Ok(created) => {
                self.dispatch(StoreEvent::Added(created.clone()));
                Ok(created)
            }
            Err(e) => {
                self.reject("add", &e);
                Err(e)
            }
        }
    }

    pub async fn update(&self, position: Position) -> DomainResult<Position> {
        debug!("[STORE] update dispatched: {}", position.id);
        self.dispatch(StoreEvent::Pending);
        match self.repo.update(&position).await {
            Ok(updated) => {
                self.dispatch(StoreEvent::Updated(updated.clone()));
                Ok(updated)
            }
            Err(e) => {
                self.reject("update", &e);
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        debug!("[STORE] delete dispatched: {}", id);
        self.dispatch(StoreEvent::Pending);
        match self.repo.delete(id).await {
            Ok(()) => {
                self.dispatch(StoreEvent::Deleted(id.to_string()));
                Ok(())
            }
            Err(e) => {
                self.reject("delete", &e);
                Err(e)
            }
        }
    }
}
