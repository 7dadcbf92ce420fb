//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Everything runs on the browser's single event loop, so the futures are not `Send`.

use async_trait::async_trait;

use super::document::{Document, Fields};
use crate::domain::{DomainResult, NewPosition, Position};

/// Narrow interface to a remote document store
///
/// Only the four operations the core relies on. No ordering or
/// transactional guarantees beyond per-call success or failure.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Insert a document, returning the store-assigned id
    async fn insert(&self, collection: &str, fields: Fields) -> DomainResult<String>;

    /// Every document currently in the collection
    async fn query_all(&self, collection: &str) -> DomainResult<Vec<Document>>;

    /// Overwrite the given fields of an existing document
    async fn update_merge(&self, collection: &str, id: &str, fields: Fields) -> DomainResult<()>;

    /// Remove a document; deleting a missing id is not an error
    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()>;
}

/// CRUD intents on positions
#[async_trait(?Send)]
pub trait PositionRepository {
    /// Store a new position and return it with its assigned id
    async fn create(&self, position: &NewPosition) -> DomainResult<Position>;

    /// List all positions, in store order
    async fn fetch_all(&self) -> DomainResult<Vec<Position>>;

    /// Send the full mutable field set keyed by id
    ///
    /// Existence of the id is not checked here.
    async fn update(&self, position: &Position) -> DomainResult<Position>;

    /// Delete position by ID
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
