//! Org Positions Core
//!
//! Layered architecture:
//! - domain: Position record and errors
//! - repository: Document store abstraction and the Position repository on top of it
//! - store: Canonical flat list + operation status, reduced from repository results
//! - tree: Forest derivation from the flat list (pure)
//! - view_state / form / feedback: UI-independent state for the tree view and edit surfaces

pub mod config;
pub mod domain;
pub mod feedback;
pub mod form;
pub mod repository;
pub mod store;
pub mod tree;
pub mod view_state;

pub use config::StoreConfig;
pub use domain::{DomainError, DomainResult, NewPosition, Position};
pub use feedback::{Action, Banner, BannerKind, BANNER_TIMEOUT_MS};
pub use form::{
    apply_submission, submit_draft, validate, Field, FieldErrors, FormSurface, PositionDraft,
    Submission, SubmitError,
};
pub use repository::{
    DocumentPositionRepository, DocumentStore, FirestoreClient, MemoryDocumentStore,
    PositionRepository,
};
pub use store::{PositionState, PositionStore, Status, StoreEvent};
pub use tree::{build_tree, descendant_ids, would_create_cycle, Forest, TreeIssue, TreeNode, TreeRow};
pub use view_state::{Focus, TreeViewState};
