//! Position Store
//!
//! Owns the canonical flat list of positions plus the operation status.
//! Actions call the repository and reduce the outcome into state; failures
//! become state instead of propagating to the UI.

mod position_store;
mod state;


pub use position_store::PositionStore;
pub use state::{PositionState, Status, StoreEvent};
